//! Core of musika: a catalog of musical transcriptions kept in one SQLite
//! table.
//!
//! This crate defines the record model, the table schema, the scoped
//! connection helper, the [`RecordStore`] service with its five operations,
//! the pie-chart model for the composer summary, and configuration loading.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod chart;
pub mod config;
pub mod error;
pub mod feedback;
pub mod model;
pub mod schema;
pub mod store;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use store::{Outcome, RecordStore};
