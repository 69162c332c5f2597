use anyhow::{Context, Result};
use musika_core::model::RecordInput;
use musika_core::{feedback, RecordStore};
use std::path::PathBuf;

use super::{print_message, RecordArgs};

pub fn update_records(db_path: PathBuf, record: RecordArgs) -> Result<()> {
    let store = RecordStore::open(&db_path).context("Failed to open database")?;

    let input: RecordInput = record.into();
    let outcome = store.update(&input.composer, &input)?;
    print_message(&feedback::updated(&outcome));

    Ok(())
}
