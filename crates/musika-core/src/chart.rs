//! Pie-chart model for the composer summary.
//!
//! Angles are in radians, measured clockwise from 12 o'clock, so the first
//! slice starts at the top of the pie.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Default title of the composer summary chart.
pub const TOP_COMPOSERS_TITLE: &str = "Top 5 composers by record count";

/// Number of records for one composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerCount {
    pub composer: String,
    pub count: u64,
}

/// One slice of a [`PieChart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub weight: u64,
    /// Share of the whole pie, in `0.0..=1.0`.
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl PieSlice {
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Build a chart with one slice per composer, weighted by record count.
    ///
    /// Zero-count entries get an empty slice; if every weight is zero the
    /// chart has no slices at all.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(title: impl Into<String>, counts: &[ComposerCount]) -> Self {
        let total: u64 = counts.iter().map(|c| c.count).sum();
        if total == 0 {
            return Self {
                title: title.into(),
                slices: Vec::new(),
            };
        }

        let mut start_angle = 0.0;
        let slices = counts
            .iter()
            .map(|c| {
                let fraction = c.count as f64 / total as f64;
                let sweep = fraction * TAU;
                let slice = PieSlice {
                    label: c.composer.clone(),
                    weight: c.count,
                    fraction,
                    start_angle,
                    sweep,
                };
                start_angle += sweep;
                slice
            })
            .collect();

        Self {
            title: title.into(),
            slices,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.weight).sum()
    }

    /// Index of the slice covering `angle` (any real number, wrapped into one
    /// turn).
    #[must_use]
    pub fn slice_at(&self, angle: f64) -> Option<usize> {
        let angle = angle.rem_euclid(TAU);
        self.slices
            .iter()
            .position(|s| s.sweep > 0.0 && angle >= s.start_angle && angle < s.end_angle())
            // Rounding can leave a sliver just below TAU uncovered.
            .or_else(|| self.slices.iter().rposition(|s| s.sweep > 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn counts(pairs: &[(&str, u64)]) -> Vec<ComposerCount> {
        pairs
            .iter()
            .map(|(composer, count)| ComposerCount {
                composer: (*composer).to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let chart = PieChart::from_counts(
            TOP_COMPOSERS_TITLE,
            &counts(&[("Bach", 5), ("Mozart", 3), ("Chopin", 2)]),
        );
        let sum: f64 = chart.slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(chart.total(), 10);
        assert!((chart.slices[0].percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_slices_are_contiguous() {
        let chart = PieChart::from_counts("t", &counts(&[("A", 1), ("B", 2), ("C", 1)]));
        assert!(chart.slices[0].start_angle.abs() < f64::EPSILON);
        for pair in chart.slices.windows(2) {
            assert!((pair[0].end_angle() - pair[1].start_angle).abs() < 1e-12);
        }
        let last = chart.slices.last().unwrap();
        assert!((last.end_angle() - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_slice_at_finds_owner() {
        let chart = PieChart::from_counts("t", &counts(&[("A", 1), ("B", 1)]));
        assert_eq!(chart.slice_at(0.1), Some(0));
        assert_eq!(chart.slice_at(PI + 0.1), Some(1));
        assert_eq!(chart.slice_at(-0.1), Some(1));
        assert_eq!(chart.slice_at(TAU - 1e-15), Some(1));
    }

    #[test]
    fn test_empty_and_zero_counts() {
        assert!(PieChart::from_counts("t", &[]).is_empty());
        let zero = PieChart::from_counts("t", &counts(&[("A", 0)]));
        assert!(zero.is_empty());
        assert_eq!(zero.slice_at(1.0), None);
    }

    #[test]
    fn test_single_composer_fills_pie() {
        let chart = PieChart::from_counts("t", &counts(&[("Bach", 4)]));
        assert_eq!(chart.slices.len(), 1);
        assert!((chart.slices[0].sweep - TAU).abs() < 1e-12);
        assert_eq!(chart.slice_at(3.0), Some(0));
    }
}
