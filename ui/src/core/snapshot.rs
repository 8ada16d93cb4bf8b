//! The drift snapshot: precomputed scalars plus a per-turn series and its turn × turn heatmap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One bundle of dashboard data, either the full payload or a truncated view of it.
///
/// The full snapshot is never edited after load. Partial views are built with
/// [`DriftSnapshot::truncated`], which borrows the original and returns a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DriftSnapshot {
    pub stability_score: f64,
    pub pf_like_metric: f64,
    /// Drift magnitude per turn, in chronological order (index 0 is turn 1).
    pub drift_series: Vec<f64>,
    /// Row-major turn × turn matrix; row `i`, column `j` pairs turn `i + 1` with turn `j + 1`.
    pub heatmap: Vec<Vec<f64>>,
}

/// Heatmap dimensions that disagree with the series length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("heatmap has {found} rows but the drift series has {expected} turns")]
    RowCount { expected: usize, found: usize },
    #[error("heatmap row {row} has {found} columns, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl DriftSnapshot {
    pub fn turn_count(&self) -> usize {
        self.drift_series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drift_series.is_empty()
    }

    /// 1-based turn labels `1..=N`.
    pub fn turn_axis(&self) -> Vec<u32> {
        (1..=self.turn_count() as u32).collect()
    }

    /// Checks that the heatmap is square and matches the series length.
    pub fn check_shape(&self) -> Result<(), ShapeError> {
        let expected = self.turn_count();
        if self.heatmap.len() != expected {
            return Err(ShapeError::RowCount {
                expected,
                found: self.heatmap.len(),
            });
        }
        for (row, values) in self.heatmap.iter().enumerate() {
            if values.len() != expected {
                return Err(ShapeError::RowLength {
                    row,
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Returns the first `turns` turns: series prefix plus the top-left `turns × turns` heatmap.
    ///
    /// Scalars are copied untouched. Requests past the end clamp to the full length, and
    /// ragged rows are cut rather than indexed, so this never panics.
    pub fn truncated(&self, turns: usize) -> DriftSnapshot {
        let turns = turns.min(self.turn_count());
        DriftSnapshot {
            stability_score: self.stability_score,
            pf_like_metric: self.pf_like_metric,
            drift_series: self.drift_series[..turns].to_vec(),
            heatmap: self
                .heatmap
                .iter()
                .take(turns)
                .map(|row| row.iter().copied().take(turns).collect())
                .collect(),
        }
    }

    /// Smallest and largest heatmap cell, ignoring non-finite values.
    pub fn heatmap_range(&self) -> Option<(f64, f64)> {
        self.heatmap
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::three_turns;
    use super::*;

    #[test]
    fn turn_axis_is_one_based() {
        assert_eq!(three_turns().turn_axis(), vec![1, 2, 3]);
        assert!(DriftSnapshot::default().turn_axis().is_empty());
    }

    #[test]
    fn truncation_keeps_series_and_heatmap_square() {
        let full = three_turns();
        for k in 0..=full.turn_count() {
            let part = full.truncated(k);
            assert_eq!(part.drift_series.len(), k);
            assert_eq!(part.heatmap.len(), k);
            assert!(part.heatmap.iter().all(|row| row.len() == k));
            assert!(part.check_shape().is_ok());
            assert_eq!(part.stability_score, full.stability_score);
            assert_eq!(part.pf_like_metric, full.pf_like_metric);
        }
    }

    #[test]
    fn truncation_takes_top_left_block() {
        let part = three_turns().truncated(2);
        assert_eq!(part.drift_series, vec![0.1, 0.4]);
        assert_eq!(part.heatmap, vec![vec![1.0, 2.0], vec![4.0, 5.0]]);
    }

    #[test]
    fn truncation_leaves_original_untouched() {
        let full = three_turns();
        let _ = full.truncated(1);
        assert_eq!(full, three_turns());
    }

    #[test]
    fn truncation_past_end_clamps() {
        let full = three_turns();
        assert_eq!(full.truncated(10), full);
    }

    #[test]
    fn ragged_heatmap_is_reported() {
        let mut snapshot = three_turns();
        snapshot.heatmap[1].pop();
        assert_eq!(
            snapshot.check_shape(),
            Err(ShapeError::RowLength {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        // still safe to truncate
        assert_eq!(snapshot.truncated(3).heatmap[1], vec![4.0, 5.0]);

        snapshot.heatmap.pop();
        assert_eq!(
            snapshot.check_shape(),
            Err(ShapeError::RowCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn heatmap_range_skips_non_finite() {
        let mut snapshot = three_turns();
        snapshot.heatmap[0][0] = f64::NAN;
        assert_eq!(snapshot.heatmap_range(), Some((2.0, 9.0)));
        assert_eq!(DriftSnapshot::default().heatmap_range(), None);
    }
}
