use rusqlite::Connection;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::table::ensure_table;

/// Where connections come from.
enum Source {
    /// A file on disk. Each unit of work opens and closes its own connection.
    File(PathBuf),
    /// A private in-memory database, which only lives as long as its single
    /// connection does.
    Memory(Connection),
}

/// Handle to the musika database.
///
/// Holds no open connection for file databases; [`Database::with_connection`]
/// acquires one per unit of work and always releases it.
pub struct Database {
    source: Source,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::File(path) => f.debug_tuple("Database").field(path).finish(),
            Source::Memory(_) => f.write_str("Database(:memory:)"),
        }
    }
}

impl Database {
    /// Open (or create) a database at the given path and make sure the
    /// records table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Self {
            source: Source::File(path),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            source: Source::Memory(Connection::open_in_memory()?),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Path of the database file, `None` for in-memory databases.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Memory(_) => None,
        }
    }

    /// Ensure the schema exists. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        self.with_connection(ensure_table)
    }

    /// Run one unit of work against a connection.
    ///
    /// For file databases the connection is opened here and closed before
    /// returning, whether `work` succeeded or not. A failure to close is
    /// logged; the result of `work` is what the caller sees.
    pub fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        match &self.source {
            Source::Memory(conn) => work(conn),
            Source::File(path) => {
                let conn = Connection::open(path)?;
                let result = work(&conn);
                if let Err((_, err)) = conn.close() {
                    log::warn!("Failed to close {}: {err}", path.display());
                }
                result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn count(db: &Database) -> i64 {
        db.with_connection(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM musicnet_metadata", [], |row| {
                row.get(0)
            })?)
        })
        .unwrap()
    }

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.path().is_none());
        assert_eq!(count(&db), 0);
    }

    #[test]
    fn test_open_creates_file_and_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("musika.sqlite3");

        let db = Database::open(&db_path).unwrap();

        assert!(db_path.exists());
        assert_eq!(db.path(), Some(db_path.as_path()));
        assert_eq!(count(&db), 0);
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("musika.sqlite3");

        let db = Database::open(&db_path).unwrap();
        db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO musicnet_metadata (composer) VALUES ('Liszt')",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let reopened = Database::open(&db_path).unwrap();
        assert_eq!(count(&reopened), 1);
    }

    #[test]
    fn test_with_connection_returns_work_error() {
        let db = Database::open_in_memory().unwrap();
        let result: Result<()> = db.with_connection(|conn| {
            conn.execute("SELECT * FROM no_such_table", [])?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::Database(_))));
    }
}
