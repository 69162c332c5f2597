use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the eight free-text inputs of the record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Composer,
    Composition,
    Movement,
    Ensemble,
    Source,
    Transcriber,
    Catalog,
    Seconds,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 8] = [
        Self::Composer,
        Self::Composition,
        Self::Movement,
        Self::Ensemble,
        Self::Source,
        Self::Transcriber,
        Self::Catalog,
        Self::Seconds,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Composer => "Composer",
            Self::Composition => "Composition",
            Self::Movement => "Movement",
            Self::Ensemble => "Ensemble",
            Self::Source => "Source",
            Self::Transcriber => "Transcriber",
            Self::Catalog => "Catalog",
            Self::Seconds => "Seconds",
        }
    }

    /// Position of this field in [`Field::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The raw text of the record form, one string per [`Field`].
///
/// Values are kept exactly as typed; [`RecordInput::trimmed`] produces the
/// copy the store works with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    pub composer: String,
    pub composition: String,
    pub movement: String,
    pub ensemble: String,
    pub source: String,
    pub transcriber: String,
    pub catalog: String,
    pub seconds: String,
}

impl RecordInput {
    #[must_use]
    pub fn new(composer: impl Into<String>, composition: impl Into<String>) -> Self {
        Self {
            composer: composer.into(),
            composition: composition.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.get_mut(field) = value.into();
        self
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Composer => &self.composer,
            Field::Composition => &self.composition,
            Field::Movement => &self.movement,
            Field::Ensemble => &self.ensemble,
            Field::Source => &self.source,
            Field::Transcriber => &self.transcriber,
            Field::Catalog => &self.catalog,
            Field::Seconds => &self.seconds,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Composer => &mut self.composer,
            Field::Composition => &mut self.composition,
            Field::Movement => &mut self.movement,
            Field::Ensemble => &mut self.ensemble,
            Field::Source => &mut self.source,
            Field::Transcriber => &mut self.transcriber,
            Field::Catalog => &mut self.catalog,
            Field::Seconds => &mut self.seconds,
        }
    }

    /// A copy with leading and trailing whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        let mut out = Self::default();
        for field in Field::ALL {
            *out.get_mut(field) = self.get(field).trim().to_string();
        }
        out
    }

    /// Parse the seconds field: empty means absent, anything else must be an
    /// integer.
    pub fn parse_seconds(&self) -> Result<Option<i64>> {
        let raw = self.seconds.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<i64>()
            .map(Some)
            .map_err(|source| Error::InvalidSeconds {
                value: raw.to_string(),
                source,
            })
    }

    /// Fail with [`Error::MissingField`] for the first of `fields` that is
    /// empty after trimming.
    pub fn require(&self, fields: &[Field]) -> Result<()> {
        match fields.iter().find(|f| self.get(**f).trim().is_empty()) {
            Some(field) => Err(Error::MissingField(*field)),
            None => Ok(()),
        }
    }
}
