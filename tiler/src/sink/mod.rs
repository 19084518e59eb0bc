//! Tile encoding and persistence.
//!
//! The [`TileSink`] trait is the seam between the pyramid driver and storage.
//! The driver hands each tile buffer to the sink as soon as it is cut, and a
//! failing sink only affects that one tile.
//!
//! ```text
//! ┌─────────────────────┐
//! │  PyramidGenerator   │
//! │   (row workers)     │
//! └──────────┬──────────┘
//!            │ write_tile(coord, &tile)
//!            ▼
//! ┌─────────────────────┐
//! │      TileSink       │ (trait)
//! └──────────┬──────────┘
//!            │
//!       ┌────┴────┐
//!       ▼         ▼
//! ┌──────────┐ ┌──────────┐
//! │   File   │ │  Tests / │
//! │ TileSink │ │  memory  │
//! └──────────┘ └──────────┘
//! ```
//!
//! # Available Sinks
//!
//! - [`FileTileSink`] - encodes PNG/JPEG and writes one file per tile

mod error;
mod file;
mod format;
mod naming;

pub use error::TileError;
pub use file::FileTileSink;
pub use format::{FormatError, TileEncoding, TileFormat, UnsupportedEncoding};
pub use naming::{NamePattern, DEFAULT_PATTERN};

use image::RgbaImage;

use crate::tile::TileCoord;

/// Destination for finished tiles.
///
/// Implementations must be thread-safe (`Send + Sync`): row workers on
/// different threads call [`write_tile`](TileSink::write_tile) concurrently,
/// always with distinct coordinates.
pub trait TileSink: Send + Sync {
    /// Encode and store one tile.
    ///
    /// Returns the number of bytes persisted.
    ///
    /// # Errors
    ///
    /// Returns `TileError` if the tile cannot be encoded or stored. The error
    /// is local to this tile.
    fn write_tile(&self, coord: TileCoord, tile: &RgbaImage) -> Result<u64, TileError>;
}

impl<S: TileSink + ?Sized> TileSink for &S {
    fn write_tile(&self, coord: TileCoord, tile: &RgbaImage) -> Result<u64, TileError> {
        (**self).write_tile(coord, tile)
    }
}

impl<S: TileSink + ?Sized> TileSink for std::sync::Arc<S> {
    fn write_tile(&self, coord: TileCoord, tile: &RgbaImage) -> Result<u64, TileError> {
        (**self).write_tile(coord, tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Sink that remembers coordinates and fails on demand.
    struct RecordingSink {
        seen: Mutex<Vec<TileCoord>>,
        fail_on: Option<TileCoord>,
    }

    impl TileSink for RecordingSink {
        fn write_tile(&self, coord: TileCoord, tile: &RgbaImage) -> Result<u64, TileError> {
            if Some(coord) == self.fail_on {
                return Err(TileError::Rejected("mock failure".to_string()));
            }
            self.seen.lock().unwrap().push(coord);
            Ok(tile.as_raw().len() as u64)
        }
    }

    #[test]
    fn test_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TileSink>();
    }

    #[test]
    fn test_trait_object_write() {
        let sink: Arc<dyn TileSink> = Arc::new(RecordingSink {
            seen: Mutex::new(Vec::new()),
            fail_on: None,
        });
        let tile = RgbaImage::new(2, 2);

        let bytes = sink.write_tile(TileCoord::new(0, 0, 0), &tile).unwrap();
        assert_eq!(bytes, 16);
    }

    #[test]
    fn test_reference_forwards() {
        let sink = RecordingSink {
            seen: Mutex::new(Vec::new()),
            fail_on: Some(TileCoord::new(1, 1, 1)),
        };
        let by_ref = &sink;
        let tile = RgbaImage::new(1, 1);

        assert!(by_ref.write_tile(TileCoord::new(1, 0, 1), &tile).is_ok());
        assert!(by_ref.write_tile(TileCoord::new(1, 1, 1), &tile).is_err());
        assert_eq!(*sink.seen.lock().unwrap(), vec![TileCoord::new(1, 0, 1)]);
    }
}
