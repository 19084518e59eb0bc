//! Error types for per-tile output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while encoding or storing a single tile.
///
/// These never abort a run; the driver records them against the tile's
/// coordinate and carries on.
#[derive(Debug, Error)]
pub enum TileError {
    /// Encoder rejected the tile.
    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Could not create the tile's directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// Could not write the encoded bytes.
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Could not move the finished file into place.
    #[error("failed to move tile into {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },

    /// Sink refused the tile for a reason of its own.
    #[error("tile rejected: {0}")]
    Rejected(String),
}
