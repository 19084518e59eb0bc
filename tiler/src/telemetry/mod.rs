//! Run telemetry for progress display and summaries.
//!
//! Workers bump lock-free atomic counters as tiles complete; readers take a
//! point-in-time copy whenever they want to display something.
//!
//! # Architecture
//!
//! ```text
//! Row workers ─────► PyramidMetrics ─────► MetricsSnapshot ─────► Views
//!                    (atomic counters)     (point-in-time copy)   (progress bar, summary)
//! ```
//!
//! # Example
//!
//! ```
//! use tiler::telemetry::PyramidMetrics;
//!
//! let metrics = PyramidMetrics::new();
//! metrics.tile_written(1_024);
//! metrics.tile_failed();
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.tiles_processed(), 2);
//! assert_eq!(snapshot.bytes_written, 1_024);
//! ```

mod metrics;
mod snapshot;

pub use metrics::PyramidMetrics;
pub use snapshot::MetricsSnapshot;
