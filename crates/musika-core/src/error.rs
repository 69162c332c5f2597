use std::num::ParseIntError;

use thiserror::Error;

use crate::model::Field;

#[derive(Debug, Error)]
pub enum Error {
    /// A required input field was empty. Raised before any storage access.
    #[error("{} is required", .0.label())]
    MissingField(Field),

    /// The seconds field held something other than an integer.
    #[error("invalid seconds value {value:?}: {source}")]
    InvalidSeconds {
        value: String,
        source: ParseIntError,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of an [`Error`], used to pick how loudly to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Parse,
    Storage,
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::Validation,
            Self::InvalidSeconds { .. } => ErrorKind::Parse,
            Self::Database(_) | Self::Io(_) => ErrorKind::Storage,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
