//! The record store service.
//!
//! [`RecordStore`] is stateless apart from knowing where the database lives.
//! Every operation validates its input, then runs exactly one statement
//! inside [`Database::with_connection`], so the connection is released on
//! every exit path.
//!
//! Search folds case (`LOWER(composer) = LOWER(?)`), while update and delete
//! compare the composer key exactly.

use std::path::Path;

use rusqlite::{params, Connection, Row};

use crate::chart::ComposerCount;
use crate::error::{Error, Result};
use crate::model::{Field, RecordId, RecordInput, TranscriptionRecord};
use crate::schema::Database;

/// Number of composers shown in the summary chart.
pub const TOP_COMPOSER_LIMIT: usize = 5;

/// The non-error result of a lookup or mutation.
///
/// `NotFound` is an ordinary outcome, not a failure: nothing matched the
/// composer key, or the table was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Matched(T),
    NotFound,
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Matched(value) => Some(value),
            Self::NotFound => None,
        }
    }
}

/// The five catalog operations over one [`Database`].
#[derive(Debug)]
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    /// Open (or create) the store at `path`, creating the table if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::open(path)?;
        log::debug!("Opened record store at {:?}", db.path());
        Ok(Self { db })
    }

    /// A store backed by a private in-memory database (for tests).
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Re-run table creation. A no-op when the table already exists.
    pub fn initialize(&self) -> Result<()> {
        self.db.initialize()
    }

    /// Insert a new record.
    ///
    /// `composer` and `composition` are required; `seconds` must be empty or
    /// an integer. Nothing touches storage unless both checks pass.
    pub fn create(&self, input: &RecordInput) -> Result<RecordId> {
        let input = input.trimmed();
        input.require(&[Field::Composer, Field::Composition])?;
        let seconds = input.parse_seconds()?;

        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO musicnet_metadata (
                    composer, composition, movement, ensemble,
                    source, transcriber, catalog_name, seconds
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    input.composer,
                    input.composition,
                    input.movement,
                    input.ensemble,
                    input.source,
                    input.transcriber,
                    input.catalog,
                    seconds,
                ],
            )?;
            Ok(RecordId::new(conn.last_insert_rowid()))
        })?;

        log::info!("Added record {id} for composer {:?}", input.composer);
        Ok(id)
    }

    /// All records whose composer equals `composer`, ignoring case, in the
    /// order SQLite returns them.
    pub fn search(&self, composer: &str) -> Result<Outcome<Vec<TranscriptionRecord>>> {
        let composer = require_composer(composer)?;

        let records = self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT Id, composer, composition, movement, ensemble,
                        source, transcriber, catalog_name, seconds
                 FROM musicnet_metadata
                 WHERE LOWER(composer) = LOWER(?1)",
            )?;
            let records = stmt
                .query_map([composer], row_to_record)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })?;

        log::debug!("Search for {composer:?} matched {} records", records.len());
        Ok(if records.is_empty() {
            Outcome::NotFound
        } else {
            Outcome::Matched(records)
        })
    }

    /// Overwrite every non-key field of all records whose composer equals
    /// `composer` exactly. Empty inputs overwrite too; an empty seconds field
    /// clears the stored value.
    ///
    /// Returns the number of rows changed.
    pub fn update(&self, composer: &str, input: &RecordInput) -> Result<Outcome<usize>> {
        let composer = require_composer(composer)?;
        let input = input.trimmed();
        let seconds = input.parse_seconds()?;

        let changed = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "UPDATE musicnet_metadata SET
                    composition = ?1, movement = ?2, ensemble = ?3, source = ?4,
                    transcriber = ?5, catalog_name = ?6, seconds = ?7
                 WHERE composer = ?8",
                params![
                    input.composition,
                    input.movement,
                    input.ensemble,
                    input.source,
                    input.transcriber,
                    input.catalog,
                    seconds,
                    composer,
                ],
            )?)
        })?;

        log::info!("Updated {changed} records for composer {composer:?}");
        Ok(affected(changed))
    }

    /// Remove all records whose composer equals `composer` exactly.
    ///
    /// Returns the number of rows removed.
    pub fn delete(&self, composer: &str) -> Result<Outcome<usize>> {
        let composer = require_composer(composer)?;

        let removed = self.db.with_connection(|conn| {
            Ok(conn.execute(
                "DELETE FROM musicnet_metadata WHERE composer = ?1",
                [composer],
            )?)
        })?;

        log::info!("Deleted {removed} records for composer {composer:?}");
        Ok(affected(removed))
    }

    /// The composers with the most records, at most [`TOP_COMPOSER_LIMIT`],
    /// by count descending. Equal counts are ordered by composer name.
    pub fn top_composers(&self) -> Result<Outcome<Vec<ComposerCount>>> {
        let counts = self.db.with_connection(|conn| top_composers(conn, TOP_COMPOSER_LIMIT))?;

        Ok(if counts.is_empty() {
            Outcome::NotFound
        } else {
            Outcome::Matched(counts)
        })
    }

    /// Total number of records.
    pub fn count(&self) -> Result<u64> {
        self.db.with_connection(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM musicnet_metadata", [], |row| {
                    row.get(0)
                })?;
            Ok(u64::try_from(count).unwrap_or(0))
        })
    }
}

fn require_composer(composer: &str) -> Result<&str> {
    let composer = composer.trim();
    if composer.is_empty() {
        return Err(Error::MissingField(Field::Composer));
    }
    Ok(composer)
}

const fn affected(rows: usize) -> Outcome<usize> {
    if rows == 0 {
        Outcome::NotFound
    } else {
        Outcome::Matched(rows)
    }
}

fn top_composers(conn: &Connection, limit: usize) -> Result<Vec<ComposerCount>> {
    let mut stmt = conn.prepare(
        "SELECT composer, COUNT(*) AS records
         FROM musicnet_metadata
         GROUP BY composer
         ORDER BY records DESC, composer ASC
         LIMIT ?1",
    )?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let counts = stmt
        .query_map([limit], |row| {
            let composer: Option<String> = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok(ComposerCount {
                composer: composer.unwrap_or_default(),
                count: u64::try_from(count).unwrap_or(0),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(counts)
}

fn row_to_record(row: &Row) -> rusqlite::Result<TranscriptionRecord> {
    Ok(TranscriptionRecord {
        id: RecordId::new(row.get(0)?),
        composer: row.get(1)?,
        composition: row.get(2)?,
        movement: row.get(3)?,
        ensemble: row.get(4)?,
        source: row.get(5)?,
        transcriber: row.get(6)?,
        catalog_name: row.get(7)?,
        seconds: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn store() -> RecordStore {
        RecordStore::in_memory().unwrap()
    }

    fn add(store: &RecordStore, composer: &str, composition: &str) -> RecordId {
        store
            .create(&RecordInput::new(composer, composition))
            .unwrap()
    }

    fn full_input() -> RecordInput {
        RecordInput::new("Bach", "Fugue")
            .with_field(Field::Movement, "I")
            .with_field(Field::Ensemble, "Solo Piano")
            .with_field(Field::Source, "European Archive")
            .with_field(Field::Transcriber, "Anon")
            .with_field(Field::Catalog, "BWV 846")
            .with_field(Field::Seconds, "120")
    }

    #[test]
    fn test_initialize_twice_keeps_rows() {
        let store = store();
        add(&store, "Bach", "Fugue");
        store.initialize().unwrap();
        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_create_requires_composer_and_composition() {
        let store = store();
        let optional = [
            RecordInput::default(),
            full_input(),
            RecordInput::default().with_field(Field::Seconds, "not a number"),
        ];

        for base in optional {
            for (composer, composition) in [("", "Fugue"), ("Bach", ""), ("", ""), ("  ", "Fugue")]
            {
                let mut input = base.clone();
                input.composer = composer.to_string();
                input.composition = composition.to_string();
                let err = store.create(&input).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Validation);
            }
        }

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_bad_seconds_without_writing() {
        let store = store();
        let input = RecordInput::new("Bach", "Fugue").with_field(Field::Seconds, "2m");
        let err = store.create(&input).unwrap_err();
        assert!(matches!(err, Error::InvalidSeconds { .. }));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_create_then_search_round_trip() {
        let store = store();
        let id = store
            .create(&RecordInput::new("Bach", "Fugue").with_field(Field::Seconds, "120"))
            .unwrap();

        let records = store.search("bach").unwrap().into_option().unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, id);
        assert_eq!(record.composer.as_deref(), Some("Bach"));
        assert_eq!(record.composition.as_deref(), Some("Fugue"));
        assert_eq!(record.movement.as_deref(), Some(""));
        assert_eq!(record.seconds, Some(120));
    }

    #[test]
    fn test_create_trims_input() {
        let store = store();
        store
            .create(&RecordInput::new("  Chopin ", " Nocturne ").with_field(Field::Seconds, " 42 "))
            .unwrap();
        let records = store.search("chopin").unwrap().into_option().unwrap();
        assert_eq!(records[0].composer.as_deref(), Some("Chopin"));
        assert_eq!(records[0].composition.as_deref(), Some("Nocturne"));
        assert_eq!(records[0].seconds, Some(42));
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let store = store();
        let first = add(&store, "Bach", "Fugue");
        store.delete("Bach").unwrap();
        let second = add(&store, "Bach", "Fugue");
        assert!(second > first);
    }

    #[test]
    fn test_search_requires_composer() {
        let store = store();
        let err = store.search("   ").unwrap_err();
        assert!(matches!(err, Error::MissingField(Field::Composer)));
    }

    #[test]
    fn test_search_is_exact_not_prefix() {
        let store = store();
        add(&store, "Bach", "Fugue");
        add(&store, "Bach, C.P.E.", "Sonata");
        let records = store.search("BACH").unwrap().into_option().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(store.search("Ba").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_search_returns_insertion_order() {
        let store = store();
        let a = add(&store, "Bach", "One");
        add(&store, "Mozart", "Two");
        let b = add(&store, "bach", "Three");
        let ids: Vec<RecordId> = store
            .search("Bach")
            .unwrap()
            .into_option()
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_case_insensitive_search_case_sensitive_mutation() {
        let store = store();
        add(&store, "Mozart", "Requiem");

        assert!(store.search("MOZART").unwrap().is_found());
        assert_eq!(
            store.update("mozart", &RecordInput::new("mozart", "Other")).unwrap(),
            Outcome::NotFound
        );
        assert_eq!(store.delete("mozart").unwrap(), Outcome::NotFound);

        let records = store.search("Mozart").unwrap().into_option().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].composition.as_deref(), Some("Requiem"));
    }

    #[test]
    fn test_update_overwrites_and_clears_seconds() {
        let store = store();
        let id = store.create(&full_input()).unwrap();

        let replacement = RecordInput::new("Bach", "Prelude").with_field(Field::Ensemble, "Organ");
        assert_eq!(
            store.update("Bach", &replacement).unwrap(),
            Outcome::Matched(1)
        );

        let record = store.search("Bach").unwrap().into_option().unwrap().remove(0);
        assert_eq!(record.id, id);
        assert_eq!(record.composer.as_deref(), Some("Bach"));
        assert_eq!(record.composition.as_deref(), Some("Prelude"));
        assert_eq!(record.movement.as_deref(), Some(""));
        assert_eq!(record.ensemble.as_deref(), Some("Organ"));
        assert_eq!(record.source.as_deref(), Some(""));
        assert_eq!(record.transcriber.as_deref(), Some(""));
        assert_eq!(record.catalog_name.as_deref(), Some(""));
        assert_eq!(record.seconds, None);
    }

    #[test]
    fn test_update_allows_empty_composition_and_hits_all_rows() {
        let store = store();
        add(&store, "Bach", "One");
        add(&store, "Bach", "Two");
        add(&store, "Liszt", "Three");

        let outcome = store
            .update("Bach", &RecordInput::new("Bach", "").with_field(Field::Seconds, "9"))
            .unwrap();
        assert_eq!(outcome, Outcome::Matched(2));

        for record in store.search("Bach").unwrap().into_option().unwrap() {
            assert_eq!(record.composition.as_deref(), Some(""));
            assert_eq!(record.seconds, Some(9));
        }
        let liszt = store.search("Liszt").unwrap().into_option().unwrap();
        assert_eq!(liszt[0].composition.as_deref(), Some("Three"));
    }

    #[test]
    fn test_update_bad_seconds_leaves_storage_unchanged() {
        let store = store();
        store.create(&full_input()).unwrap();

        let bad = RecordInput::new("Bach", "Changed").with_field(Field::Seconds, "x");
        let err = store.update("Bach", &bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let record = store.search("Bach").unwrap().into_option().unwrap().remove(0);
        assert_eq!(record.composition.as_deref(), Some("Fugue"));
        assert_eq!(record.seconds, Some(120));
    }

    #[test]
    fn test_update_requires_composer() {
        let store = store();
        let err = store.update("", &RecordInput::default()).unwrap_err();
        assert!(matches!(err, Error::MissingField(Field::Composer)));
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let store = store();
        add(&store, "Bach", "One");
        add(&store, "Bach", "Two");
        add(&store, "Bach", "Three");
        add(&store, "Mozart", "Four");

        assert_eq!(store.delete("Bach").unwrap(), Outcome::Matched(3));
        assert_eq!(store.count().unwrap(), 1);
        assert!(store.search("Mozart").unwrap().is_found());
        assert_eq!(store.delete("Bach").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_delete_requires_composer() {
        let store = store();
        assert!(matches!(
            store.delete(" ").unwrap_err(),
            Error::MissingField(Field::Composer)
        ));
    }

    #[test]
    fn test_top_composers_limits_to_five_by_count() {
        let store = store();
        for (composer, n) in [
            ("Bach", 5),
            ("Mozart", 3),
            ("Beethoven", 3),
            ("Chopin", 1),
            ("Liszt", 1),
            ("Haydn", 1),
        ] {
            for i in 0..n {
                add(&store, composer, &format!("Piece {i}"));
            }
        }

        let counts = store.top_composers().unwrap().into_option().unwrap();
        let pairs: Vec<(&str, u64)> = counts
            .iter()
            .map(|c| (c.composer.as_str(), c.count))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Bach", 5),
                ("Beethoven", 3),
                ("Mozart", 3),
                ("Chopin", 1),
                ("Haydn", 1),
            ]
        );
    }

    #[test]
    fn test_top_composers_on_empty_table() {
        let store = store();
        assert_eq!(store.top_composers().unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_top_composers_is_read_only() {
        let store = store();
        add(&store, "Bach", "Fugue");
        store.top_composers().unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
