//! The pyramid driver.

use std::sync::Arc;
use std::time::Instant;

use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::report::RowOutcome;
use super::{LevelSummary, PyramidConfig, PyramidError, PyramidReport, TileFailure};
use crate::resample::resize;
use crate::sink::TileSink;
use crate::telemetry::PyramidMetrics;
use crate::tile::{grid_side, level_dimension, TileCoord, TileGrid};

/// Generates every level of a pyramid from one source raster.
///
/// Each level is resampled directly from the original source rather than
/// from the level above it, so errors never compound across levels.
pub struct PyramidGenerator<S> {
    config: PyramidConfig,
    sink: S,
    metrics: Arc<PyramidMetrics>,
}

impl<S: TileSink> PyramidGenerator<S> {
    pub fn new(config: PyramidConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            metrics: Arc::new(PyramidMetrics::new()),
        }
    }

    /// Report progress into shared metrics, e.g. ones polled by a progress bar.
    pub fn with_metrics(mut self, metrics: Arc<PyramidMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &PyramidConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn metrics(&self) -> &Arc<PyramidMetrics> {
        &self.metrics
    }

    /// Produce levels `0..=max_level` and return once every tile has been
    /// written, has failed, or was skipped by cancellation.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, an empty source, or a
    /// level that could not be resampled. Individual tile failures are
    /// reported in [`PyramidReport`] instead.
    pub fn generate(&self, source: &RgbaImage) -> Result<PyramidReport, PyramidError> {
        self.config.validate()?;
        if source.width() == 0 || source.height() == 0 {
            return Err(PyramidError::EmptySource);
        }

        let started = Instant::now();
        info!(
            max_level = self.config.max_level(),
            tile_size = self.config.tile_size(),
            kernel = %self.config.kernel(),
            source_width = source.width(),
            source_height = source.height(),
            "Generating pyramid"
        );

        let levels = match self.config.threads() {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("tiler-worker-{}", i))
                    .build()?;
                pool.install(|| self.generate_levels(source))?
            }
            None => self.generate_levels(source)?,
        };

        let cancelled = levels.iter().any(|l| l.tiles_skipped > 0);
        let report = PyramidReport {
            levels,
            cancelled,
            elapsed: started.elapsed(),
        };

        info!(
            written = report.tiles_written(),
            failed = report.tiles_failed(),
            skipped = report.tiles_skipped(),
            cancelled = report.cancelled,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Pyramid finished"
        );
        Ok(report)
    }

    fn generate_levels(&self, source: &RgbaImage) -> Result<Vec<LevelSummary>, PyramidError> {
        (0..=self.config.max_level())
            .into_par_iter()
            .map(|level| self.generate_level(source, level))
            .collect()
    }

    fn generate_level(&self, source: &RgbaImage, level: u32) -> Result<LevelSummary, PyramidError> {
        let tile_size = self.config.tile_size();
        let too_deep = || PyramidError::LevelTooDeep { level, tile_size };
        let side = grid_side(level).ok_or_else(too_deep)?;
        let dimension = level_dimension(level, tile_size).ok_or_else(too_deep)?;

        if self.config.cancellation().is_cancelled() {
            let summary = LevelSummary::skipped(level, side);
            self.metrics.tiles_skipped(summary.tiles_skipped);
            debug!(level, "Level skipped after cancellation");
            return Ok(summary);
        }

        let started = Instant::now();
        debug!(level, dimension, kernel = %self.config.kernel(), "Resampling level");
        let raster = resize(source, dimension, dimension, self.config.kernel())
            .map_err(|source| PyramidError::Resample { level, source })?;
        let grid = TileGrid::new(&raster, level, tile_size)?;

        let rows: Vec<RowOutcome> = (0..side)
            .into_par_iter()
            .map(|y| self.write_row(&grid, y))
            .collect();

        let summary = LevelSummary::from_rows(level, side, rows, started.elapsed());
        self.metrics.level_completed();
        debug!(
            level,
            written = summary.tiles_written,
            failed = summary.tiles_failed,
            skipped = summary.tiles_skipped,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Level complete"
        );
        Ok(summary)
    }

    /// Sweep one row left to right, holding a single tile buffer at a time.
    fn write_row(&self, grid: &TileGrid<'_>, y: u32) -> RowOutcome {
        let level = grid.level();
        let side = grid.side();
        let mut outcome = RowOutcome::default();

        for x in 0..side {
            if self.config.cancellation().is_cancelled() {
                let remaining = (side - x) as u64;
                outcome.skipped += remaining;
                self.metrics.tiles_skipped(remaining);
                break;
            }

            let coord = TileCoord::new(level, x, y);
            let tile = grid.extract(x, y);
            match self.sink.write_tile(coord, &tile) {
                Ok(bytes) => {
                    outcome.written += 1;
                    self.metrics.tile_written(bytes);
                }
                Err(e) => {
                    warn!(level, x, y, error = %e, "Failed to write tile");
                    self.metrics.tile_failed();
                    outcome.failures.push(TileFailure::new(coord, e.to_string()));
                }
            }
        }

        outcome
    }
}
