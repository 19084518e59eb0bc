//! Atomic counters shared by pyramid workers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::MetricsSnapshot;

/// Live counters for a pyramid run.
///
/// Share it behind an `Arc`; every method takes `&self`.
#[derive(Debug)]
pub struct PyramidMetrics {
    started: Instant,
    tiles_written: AtomicU64,
    tiles_failed: AtomicU64,
    tiles_skipped: AtomicU64,
    bytes_written: AtomicU64,
    levels_completed: AtomicU64,
}

impl PyramidMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            tiles_written: AtomicU64::new(0),
            tiles_failed: AtomicU64::new(0),
            tiles_skipped: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            levels_completed: AtomicU64::new(0),
        }
    }

    /// Record a tile that reached its sink.
    pub fn tile_written(&self, bytes: u64) {
        self.tiles_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn tile_failed(&self) {
        self.tiles_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record tiles abandoned by cancellation.
    pub fn tiles_skipped(&self, count: u64) {
        self.tiles_skipped.fetch_add(count, Ordering::Relaxed);
    }

    pub fn level_completed(&self) {
        self.levels_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tiles_written: self.tiles_written.load(Ordering::Relaxed),
            tiles_failed: self.tiles_failed.load(Ordering::Relaxed),
            tiles_skipped: self.tiles_skipped.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            levels_completed: self.levels_completed.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }
}

impl Default for PyramidMetrics {
    fn default() -> Self {
        Self::new()
    }
}
