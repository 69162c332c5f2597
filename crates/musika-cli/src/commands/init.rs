use anyhow::{Context, Result};
use musika_core::RecordStore;
use std::path::PathBuf;

/// Create the database and its table if missing, then report what is there.
pub fn init_database(db_path: PathBuf) -> Result<()> {
    let existed = db_path.exists();
    let store = RecordStore::open(&db_path).context("Failed to open database")?;
    let count = store.count()?;

    if existed {
        println!("Database already exists: {}", db_path.display());
    } else {
        println!("✓ Created database: {}", db_path.display());
    }
    println!("  Records: {count}");

    Ok(())
}
