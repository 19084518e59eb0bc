//! Point-in-time copy of run counters.

use std::time::Duration;

/// Counter values captured at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub tiles_written: u64,
    pub tiles_failed: u64,
    pub tiles_skipped: u64,
    pub bytes_written: u64,
    pub levels_completed: u64,
    /// Time since the metrics were created.
    pub elapsed: Duration,
}

impl MetricsSnapshot {
    /// Tiles that have reached a final state, whatever it was.
    pub fn tiles_processed(&self) -> u64 {
        self.tiles_written + self.tiles_failed + self.tiles_skipped
    }

    /// Written tiles per second since the run started.
    pub fn tiles_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.tiles_written as f64 / secs
        } else {
            0.0
        }
    }
}
