//! Pyramid run configuration.

use tokio_util::sync::CancellationToken;

use super::PyramidError;
use crate::resample::Kernel;
use crate::tile::level_dimension;

/// Default tile side length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Default lossy-encoder quality.
pub const DEFAULT_QUALITY: u32 = 5;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "tiles";

/// Settings for one pyramid run.
///
/// The config travels explicitly from the driver into every level and row
/// worker; nothing is read from global state, so several differently
/// configured runs can share a process.
///
/// By default a run must cover at least two levels (`max_level >= 1`).
/// [`with_allow_single_level`](Self::with_allow_single_level) relaxes this so
/// `max_level = 0` yields the single level-0 tile.
///
/// # Example
///
/// ```
/// use tiler::pyramid::PyramidConfig;
/// use tiler::resample::Kernel;
///
/// let config = PyramidConfig::new(4)
///     .with_tile_size(512)
///     .with_kernel(Kernel::Lanczos2);
///
/// assert!(config.validate().is_ok());
/// assert!(PyramidConfig::new(0).validate().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PyramidConfig {
    max_level: u32,
    tile_size: u32,
    kernel: Kernel,
    allow_single_level: bool,
    threads: Option<usize>,
    cancellation: CancellationToken,
}

impl PyramidConfig {
    /// Create a config for levels `0..=max_level` with default settings.
    pub fn new(max_level: u32) -> Self {
        Self {
            max_level,
            tile_size: DEFAULT_TILE_SIZE,
            kernel: Kernel::default(),
            allow_single_level: false,
            threads: None,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Accept `max_level = 0`.
    pub fn with_allow_single_level(mut self, allow: bool) -> Self {
        self.allow_single_level = allow;
        self
    }

    /// Run on a dedicated pool of `threads` workers instead of the global pool.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    pub fn allow_single_level(&self) -> bool {
        self.allow_single_level
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Smallest `max_level` this config accepts.
    pub fn min_max_level(&self) -> u32 {
        if self.allow_single_level {
            0
        } else {
            1
        }
    }

    /// Check every setting without doing any work.
    pub fn validate(&self) -> Result<(), PyramidError> {
        if self.tile_size == 0 {
            return Err(PyramidError::InvalidTileSize);
        }
        if self.max_level < self.min_max_level() {
            return Err(PyramidError::LevelTooShallow {
                requested: self.max_level,
                minimum: self.min_max_level(),
            });
        }
        if level_dimension(self.max_level, self.tile_size).is_none() {
            return Err(PyramidError::LevelTooDeep {
                level: self.max_level,
                tile_size: self.tile_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PyramidConfig::new(3);
        assert_eq!(config.max_level(), 3);
        assert_eq!(config.tile_size(), 256);
        assert_eq!(config.kernel(), Kernel::Bicubic);
        assert!(!config.allow_single_level());
        assert_eq!(config.threads(), None);
        assert!(!config.cancellation().is_cancelled());
    }

    #[test]
    fn test_builder() {
        let token = CancellationToken::new();
        let config = PyramidConfig::new(2)
            .with_tile_size(64)
            .with_kernel(Kernel::NearestNeighbor)
            .with_allow_single_level(true)
            .with_threads(Some(3))
            .with_cancellation(token.clone());

        assert_eq!(config.tile_size(), 64);
        assert_eq!(config.kernel(), Kernel::NearestNeighbor);
        assert!(config.allow_single_level());
        assert_eq!(config.threads(), Some(3));

        token.cancel();
        assert!(config.cancellation().is_cancelled());
    }

    #[test]
    fn test_validate_rejects_zero_tile_size() {
        let err = PyramidConfig::new(1).with_tile_size(0).validate().unwrap_err();
        assert!(matches!(err, PyramidError::InvalidTileSize));
    }

    #[test]
    fn test_validate_rejects_level_zero_by_default() {
        let err = PyramidConfig::new(0).validate().unwrap_err();
        assert!(matches!(
            err,
            PyramidError::LevelTooShallow {
                requested: 0,
                minimum: 1
            }
        ));
    }

    #[test]
    fn test_validate_allows_level_zero_when_enabled() {
        assert!(PyramidConfig::new(0)
            .with_allow_single_level(true)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_depth() {
        let err = PyramidConfig::new(24).validate().unwrap_err();
        assert!(matches!(
            err,
            PyramidError::LevelTooDeep {
                level: 24,
                tile_size: 256
            }
        ));
        assert!(PyramidConfig::new(24).with_tile_size(1).validate().is_ok());
    }
}
