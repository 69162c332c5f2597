pub mod ids;
pub mod input;
pub mod record;

pub use ids::RecordId;
pub use input::{Field, RecordInput};
pub use record::{TranscriptionRecord, GRID_COLUMNS};
