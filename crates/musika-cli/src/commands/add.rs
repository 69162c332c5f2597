use anyhow::{Context, Result};
use musika_core::{feedback, RecordStore};
use std::path::PathBuf;

use super::{print_message, RecordArgs};

pub fn add_record(db_path: PathBuf, record: RecordArgs) -> Result<()> {
    let store = RecordStore::open(&db_path).context("Failed to open database")?;

    let id = store.create(&record.into())?;
    print_message(&feedback::created(id));

    Ok(())
}
