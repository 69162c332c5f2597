use anyhow::{Context, Result};
use musika_core::model::{TranscriptionRecord, GRID_COLUMNS};
use musika_core::{feedback, Outcome, RecordStore};
use std::path::PathBuf;

use super::print_message;

pub fn search_records(db_path: PathBuf, composer: &str, json: bool) -> Result<()> {
    let store = RecordStore::open(&db_path).context("Failed to open database")?;

    let outcome = store.search(composer)?;

    if json {
        let records: &[TranscriptionRecord] = match &outcome {
            Outcome::Matched(records) => records.as_slice(),
            Outcome::NotFound => &[],
        };
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if let Outcome::Matched(records) = &outcome {
        print!("{}", render_table(records));
        println!();
    }
    print_message(&feedback::searched(&outcome));

    Ok(())
}

/// Lay records out under the grid headers, each column as wide as its
/// widest cell.
fn render_table(records: &[TranscriptionRecord]) -> String {
    let rows: Vec<[String; 9]> = records.iter().map(TranscriptionRecord::grid_cells).collect();

    let mut widths = GRID_COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = GRID_COLUMNS.iter().map(|h| (*h).to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
