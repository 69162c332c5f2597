use anyhow::{Context, Result};
use musika_core::chart::{PieChart, TOP_COMPOSERS_TITLE};
use musika_core::{feedback, Outcome, RecordStore};
use std::path::PathBuf;

use super::print_message;

const BAR_WIDTH: usize = 30;

/// Print the top-composer summary as a legend with proportional bars.
pub fn show_chart(db_path: PathBuf, json: bool) -> Result<()> {
    let store = RecordStore::open(&db_path).context("Failed to open database")?;

    let counts = match store.top_composers()? {
        Outcome::Matched(counts) => counts,
        Outcome::NotFound => {
            print_message(&feedback::empty_catalog());
            return Ok(());
        }
    };

    let chart = PieChart::from_counts(TOP_COMPOSERS_TITLE, &counts);

    if json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!("\n{}\n", chart.title);
    let label_width = chart
        .slices
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);
    for slice in &chart.slices {
        println!(
            "  {:<label_width$}  {:>4}  {:>5.1}%  {}",
            slice.label,
            slice.weight,
            slice.percent(),
            bar(slice.fraction),
        );
    }
    println!();

    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(fraction: f64) -> String {
    let cells = (fraction * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_with_fraction() {
        assert_eq!(bar(0.0), "");
        assert_eq!(bar(1.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(0.5).chars().count(), BAR_WIDTH / 2);
    }
}
