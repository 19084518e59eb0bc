//! Image resampling with selectable interpolation kernels.
//!
//! [`resize`] produces a new raster of exactly the requested size. Separable
//! kernels run one pass per axis: a horizontal pass into an `f32`
//! intermediate, then a vertical pass back to 8-bit channels. When shrinking,
//! the kernel is stretched by the scale factor so every source pixel
//! contributes to the result.
//!
//! # Kernels
//!
//! | Kernel              | Support | Notes                          |
//! |---------------------|---------|--------------------------------|
//! | `NearestNeighbor`   | 0.5     | single tap, no averaging       |
//! | `Bilinear`          | 1       | triangle                       |
//! | `Bicubic`           | 2       | Catmull-Rom cubic (a = -0.5)   |
//! | `MitchellNetravali` | 2       | B = C = 1/3                    |
//! | `Lanczos2`          | 2       | windowed sinc                  |
//! | `Lanczos3`          | 3       | windowed sinc                  |
//!
//! Output is deterministic: rows may be computed on several threads, but each
//! output value is a fixed-order sum over the same taps.

mod filter;
mod kernel;

pub use filter::resize;
pub use kernel::{Kernel, UnknownKernel};

use thiserror::Error;

/// Errors that can occur while resampling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// Requested target has a zero dimension.
    #[error("target dimensions {width}×{height} must be positive")]
    ZeroTarget { width: u32, height: u32 },

    /// Source image has no pixels.
    #[error("source image is empty")]
    EmptySource,

    /// Target is too large to allocate in memory.
    #[error("target dimensions {width}×{height} are too large")]
    TooLarge { width: u32, height: u32 },
}
