pub mod add;
pub mod chart;
pub mod config;
pub mod delete;
pub mod init;
pub mod search;
pub mod update;

pub use add::add_record;
pub use chart::show_chart;
pub use delete::delete_records;
pub use init::init_database;
pub use search::search_records;
pub use update::update_records;

use musika_core::feedback::{Message, Severity};
use musika_core::model::RecordInput;

/// The eight record fields as command-line flags. Omitted flags are empty.
#[derive(Debug, Clone, clap::Args)]
pub struct RecordArgs {
    #[arg(long, default_value = "")]
    pub composer: String,
    #[arg(long, default_value = "")]
    pub composition: String,
    #[arg(long, default_value = "")]
    pub movement: String,
    #[arg(long, default_value = "")]
    pub ensemble: String,
    #[arg(long, default_value = "")]
    pub source: String,
    #[arg(long, default_value = "")]
    pub transcriber: String,
    #[arg(long, default_value = "")]
    pub catalog: String,
    /// Duration in whole seconds
    #[arg(long, default_value = "")]
    pub seconds: String,
}

impl From<RecordArgs> for RecordInput {
    fn from(args: RecordArgs) -> Self {
        Self {
            composer: args.composer,
            composition: args.composition,
            movement: args.movement,
            ensemble: args.ensemble,
            source: args.source,
            transcriber: args.transcriber,
            catalog: args.catalog,
            seconds: args.seconds,
        }
    }
}

/// Print an outcome message with a marker for its severity.
fn print_message(message: &Message) {
    match message.severity {
        Severity::Success => println!("✓ {message}"),
        Severity::Info => println!("{message}"),
        Severity::Warning => eprintln!("⚠ {message}"),
        Severity::Critical => eprintln!("✗ {message}"),
    }
}
