use rusqlite::Connection;

use crate::error::Result;

/// The single table holding transcription records.
pub const TABLE_NAME: &str = "musicnet_metadata";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS musicnet_metadata (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    composer TEXT,
    composition TEXT,
    movement TEXT,
    ensemble TEXT,
    source TEXT,
    transcriber TEXT,
    catalog_name TEXT,
    seconds INTEGER
)
"#;

/// Create the records table if it does not exist yet. Safe to call on every
/// start.
pub fn ensure_table(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_TABLE, [])?;
    Ok(())
}
