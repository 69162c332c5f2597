use anyhow::Result;
use clap::Parser;
use musika_core::Config;
use std::path::PathBuf;

mod commands;
mod logging;
mod tui;

#[derive(Debug, Parser)]
#[command(name = "musika", version, about)]
struct Cli {
    /// Defaults to the terminal form when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the database (default: ~/.local/share/musika/musika.sqlite3)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Open the interactive record form
    ///
    /// Eight input fields, a results grid, and a composer chart. Keys:
    ///
    /// - Tab / Shift-Tab: move between fields
    /// - F2 Add, F3 Search, F4 Update, F5 Delete, F6 Show Chart
    /// - Esc or F10: quit (Esc closes the chart first)
    Tui,
    /// Add a record; composer and composition are required
    Add {
        #[command(flatten)]
        record: commands::RecordArgs,
    },
    /// List records whose composer matches, ignoring case
    Search {
        composer: String,

        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Overwrite all records with exactly this composer
    ///
    /// Every field other than the composer is replaced, including with empty
    /// values. Leaving --seconds out clears the stored duration.
    Update {
        #[command(flatten)]
        record: commands::RecordArgs,
    },
    /// Delete all records with exactly this composer
    Delete { composer: String },
    /// Show the five composers with the most records
    Chart {
        /// Print the chart slices as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create the database file and table if missing
    Init,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Write the example config file if none exists
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_db_path(cli.db)?;
    logging::init(&config.logging);

    let db_path = config.database_path.clone();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => tui::run_tui(db_path)?,
        Commands::Add { record } => commands::add_record(db_path, record)?,
        Commands::Search { composer, json } => commands::search_records(db_path, &composer, json)?,
        Commands::Update { record } => commands::update_records(db_path, record)?,
        Commands::Delete { composer } => commands::delete_records(db_path, &composer)?,
        Commands::Chart { json } => commands::show_chart(db_path, json)?,
        Commands::Init => commands::init_database(db_path)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
