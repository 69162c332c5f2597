use serde::{Deserialize, Serialize};

use crate::model::ids::RecordId;

/// Column headers of the record grid, in display order.
pub const GRID_COLUMNS: [&str; 9] = [
    "ID",
    "Composer",
    "Composition",
    "Movement",
    "Ensemble",
    "Source",
    "Transcriber",
    "Catalog Name",
    "Seconds",
];

/// One row of the `musicnet_metadata` table.
///
/// Text columns are nullable in storage; `None` is a SQL `NULL`, while an
/// empty string is stored and returned as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    pub id: RecordId,
    pub composer: Option<String>,
    pub composition: Option<String>,
    pub movement: Option<String>,
    pub ensemble: Option<String>,
    pub source: Option<String>,
    pub transcriber: Option<String>,
    pub catalog_name: Option<String>,

    /// Duration in seconds; absent when the input was left empty.
    pub seconds: Option<i64>,
}

impl TranscriptionRecord {
    /// Render every column as grid text, `NULL` becoming an empty cell.
    #[must_use]
    pub fn grid_cells(&self) -> [String; 9] {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        [
            self.id.to_string(),
            text(&self.composer),
            text(&self.composition),
            text(&self.movement),
            text(&self.ensemble),
            text(&self.source),
            text(&self.transcriber),
            text(&self.catalog_name),
            self.seconds.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}
