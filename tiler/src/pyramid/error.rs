//! Error types for pyramid generation.

use thiserror::Error;

use crate::resample::{ResampleError, UnknownKernel};
use crate::sink::{FormatError, UnsupportedEncoding};
use crate::tile::GridError;

/// Errors that stop a pyramid run.
///
/// Everything except [`PyramidError::Resample`], [`PyramidError::Grid`] and
/// [`PyramidError::ThreadPool`] is a configuration problem reported before
/// any tile is produced. Failures of individual tiles are not errors at this
/// level; they are collected in the run report.
#[derive(Debug, Error)]
pub enum PyramidError {
    /// Tile size of zero.
    #[error("tile size must be a positive integer")]
    InvalidTileSize,

    /// Requested depth below the configured minimum.
    #[error("level must be at least {minimum} (got {requested})")]
    LevelTooShallow { requested: u32, minimum: u32 },

    /// Deepest level's raster would not fit in a `u32` dimension.
    #[error("level {level} with tile size {tile_size} exceeds the maximum raster dimension")]
    LevelTooDeep { level: u32, tile_size: u32 },

    /// Source image has no pixels.
    #[error("source image is empty")]
    EmptySource,

    #[error(transparent)]
    UnknownKernel(#[from] UnknownKernel),

    #[error(transparent)]
    UnsupportedEncoding(#[from] UnsupportedEncoding),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// Resampling a level failed.
    #[error("resampling level {level} failed: {source}")]
    Resample { level: u32, source: ResampleError },

    /// A level raster did not match its grid.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl PyramidError {
    /// Whether this error comes from invalid settings rather than a runtime fault.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PyramidError::InvalidTileSize
                | PyramidError::LevelTooShallow { .. }
                | PyramidError::LevelTooDeep { .. }
                | PyramidError::UnknownKernel(_)
                | PyramidError::UnsupportedEncoding(_)
                | PyramidError::Format(_)
        )
    }
}
