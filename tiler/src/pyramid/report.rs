//! Run results.

use std::time::Duration;

use serde::Serialize;

use crate::tile::TileCoord;

/// A tile that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileFailure {
    pub coord: TileCoord,
    pub message: String,
}

impl TileFailure {
    pub fn new(coord: TileCoord, message: impl Into<String>) -> Self {
        Self {
            coord,
            message: message.into(),
        }
    }
}

/// Outcome of one row sweep.
#[derive(Debug, Clone, Default)]
pub(crate) struct RowOutcome {
    pub written: u64,
    pub skipped: u64,
    pub failures: Vec<TileFailure>,
}

/// Outcome of one zoom level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: u32,
    /// Tiles per axis at this level.
    pub side: u32,
    pub tiles_written: u64,
    pub tiles_failed: u64,
    /// Tiles never attempted because the run was cancelled.
    pub tiles_skipped: u64,
    pub elapsed: Duration,
    pub failures: Vec<TileFailure>,
}

impl LevelSummary {
    pub(crate) fn from_rows(level: u32, side: u32, rows: Vec<RowOutcome>, elapsed: Duration) -> Self {
        let mut summary = Self::skipped(level, side);
        summary.tiles_skipped = 0;
        summary.elapsed = elapsed;
        for row in rows {
            summary.tiles_written += row.written;
            summary.tiles_skipped += row.skipped;
            summary.tiles_failed += row.failures.len() as u64;
            summary.failures.extend(row.failures);
        }
        summary
    }

    /// A level that was cancelled before it started.
    pub(crate) fn skipped(level: u32, side: u32) -> Self {
        Self {
            level,
            side,
            tiles_written: 0,
            tiles_failed: 0,
            tiles_skipped: side as u64 * side as u64,
            elapsed: Duration::ZERO,
            failures: Vec::new(),
        }
    }

    /// Total tiles in this level's grid.
    pub fn tile_count(&self) -> u64 {
        self.side as u64 * self.side as u64
    }
}

/// Aggregate result of a pyramid run.
///
/// Per-tile failures never abort a run; they end up here so callers can
/// decide how to treat a partial pyramid.
#[derive(Debug, Clone, Default)]
pub struct PyramidReport {
    /// One entry per level, in ascending level order.
    pub levels: Vec<LevelSummary>,
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl PyramidReport {
    pub fn tiles_written(&self) -> u64 {
        self.levels.iter().map(|l| l.tiles_written).sum()
    }

    pub fn tiles_failed(&self) -> u64 {
        self.levels.iter().map(|l| l.tiles_failed).sum()
    }

    pub fn tiles_skipped(&self) -> u64 {
        self.levels.iter().map(|l| l.tiles_skipped).sum()
    }

    /// Every failed tile across all levels.
    pub fn failures(&self) -> impl Iterator<Item = &TileFailure> {
        self.levels.iter().flat_map(|l| l.failures.iter())
    }

    /// True when every tile of every level was written.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.tiles_failed() == 0 && self.tiles_skipped() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(written: u64, skipped: u64, failed: &[(u32, u32)]) -> RowOutcome {
        RowOutcome {
            written,
            skipped,
            failures: failed
                .iter()
                .map(|&(x, y)| TileFailure::new(TileCoord::new(2, x, y), "boom"))
                .collect(),
        }
    }

    #[test]
    fn test_level_from_rows() {
        let rows = vec![row(4, 0, &[]), row(3, 0, &[(1, 1)]), row(2, 2, &[])];
        let level = LevelSummary::from_rows(2, 4, rows, Duration::from_millis(5));

        assert_eq!(level.tiles_written, 9);
        assert_eq!(level.tiles_failed, 1);
        assert_eq!(level.tiles_skipped, 2);
        assert_eq!(level.failures[0].coord, TileCoord::new(2, 1, 1));
        assert_eq!(level.elapsed, Duration::from_millis(5));
        assert_eq!(level.tile_count(), 16);
    }

    #[test]
    fn test_skipped_level() {
        let level = LevelSummary::skipped(3, 8);
        assert_eq!(level.tiles_skipped, 64);
        assert_eq!(level.tiles_written, 0);
    }

    #[test]
    fn test_report_totals() {
        let report = PyramidReport {
            levels: vec![
                LevelSummary::from_rows(0, 1, vec![row(1, 0, &[])], Duration::ZERO),
                LevelSummary::from_rows(
                    1,
                    2,
                    vec![row(1, 0, &[(1, 0)]), row(2, 0, &[])],
                    Duration::ZERO,
                ),
            ],
            cancelled: false,
            elapsed: Duration::ZERO,
        };

        assert_eq!(report.tiles_written(), 4);
        assert_eq!(report.tiles_failed(), 1);
        assert_eq!(report.failures().count(), 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_complete() {
        let report = PyramidReport {
            levels: vec![LevelSummary::from_rows(
                0,
                1,
                vec![row(1, 0, &[])],
                Duration::ZERO,
            )],
            cancelled: false,
            elapsed: Duration::ZERO,
        };
        assert!(report.is_complete());
    }

    #[test]
    fn test_cancelled_report_is_not_complete() {
        let report = PyramidReport {
            cancelled: true,
            ..Default::default()
        };
        assert!(!report.is_complete());
    }
}
