//! Progress bar driven by pyramid metrics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tiler::telemetry::PyramidMetrics;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} tiles ({per_sec}) {msg}";

/// Polls [`PyramidMetrics`] on a background thread and redraws the bar.
pub struct ProgressReporter {
    handle: Option<JoinHandle<()>>,
    done: Arc<AtomicBool>,
}

impl ProgressReporter {
    /// Start polling `metrics` against `total` expected tiles.
    pub fn start(metrics: Arc<PyramidMetrics>, total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);

        let done = Arc::new(AtomicBool::new(false));
        let done_flag = Arc::clone(&done);

        let handle = thread::spawn(move || {
            while !done_flag.load(Ordering::SeqCst) {
                update(&bar, &metrics);
                thread::sleep(POLL_INTERVAL);
            }
            update(&bar, &metrics);
            bar.finish_and_clear();
        });

        Self {
            handle: Some(handle),
            done,
        }
    }

    /// Stop polling and remove the bar.
    pub fn finish(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.done.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn update(bar: &ProgressBar, metrics: &PyramidMetrics) {
    let snapshot = metrics.snapshot();
    bar.set_position(snapshot.tiles_processed());
    if snapshot.tiles_failed > 0 {
        bar.set_message(format!("{} failed", snapshot.tiles_failed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_joins_thread() {
        let metrics = Arc::new(PyramidMetrics::new());
        let reporter = ProgressReporter::start(Arc::clone(&metrics), 5);
        metrics.tile_written(10);
        metrics.tile_failed();
        reporter.finish();
        assert_eq!(metrics.snapshot().tiles_processed(), 2);
    }

    #[test]
    fn test_drop_stops_reporter() {
        let metrics = Arc::new(PyramidMetrics::new());
        let reporter = ProgressReporter::start(metrics, 1);
        drop(reporter);
    }
}
