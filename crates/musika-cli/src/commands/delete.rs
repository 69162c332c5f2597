use anyhow::{Context, Result};
use musika_core::{feedback, RecordStore};
use std::path::PathBuf;

use super::print_message;

pub fn delete_records(db_path: PathBuf, composer: &str) -> Result<()> {
    let store = RecordStore::open(&db_path).context("Failed to open database")?;

    let outcome = store.delete(composer)?;
    print_message(&feedback::deleted(&outcome));

    Ok(())
}
