//! Partitioning a level raster into tiles.
//!
//! The driver always resamples a level to exactly `side * tile_size` pixels
//! per axis, so the grid never needs padding or remainder handling. Tiles are
//! deep copies: once a level's sweep finishes the level raster can be dropped
//! while encoded tiles are still in flight.

use image::{imageops, RgbaImage};
use thiserror::Error;

use super::coord::{level_dimension, TileCoord};

/// Errors raised when a raster does not match its level's grid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Raster is not `side * tile_size` square.
    #[error("level {level} raster is {width}×{height}, expected {expected}×{expected}")]
    DimensionMismatch {
        level: u32,
        width: u32,
        height: u32,
        expected: u32,
    },

    /// `2^level * tile_size` does not fit in a `u32`.
    #[error("level {level} with tile size {tile_size} exceeds the maximum raster dimension")]
    LevelTooDeep { level: u32, tile_size: u32 },

    /// Tile size of zero.
    #[error("tile size must be positive")]
    ZeroTileSize,
}

/// Pixel rectangle of one tile inside the level raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A level raster viewed as a `side × side` grid of square tiles.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use tiler::tile::TileGrid;
///
/// let raster = RgbaImage::new(512, 512);
/// let grid = TileGrid::new(&raster, 1, 256).unwrap();
///
/// assert_eq!(grid.side(), 2);
/// let tile = grid.extract(1, 0);
/// assert_eq!(tile.dimensions(), (256, 256));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TileGrid<'a> {
    raster: &'a RgbaImage,
    level: u32,
    tile_size: u32,
    side: u32,
}

impl<'a> TileGrid<'a> {
    /// Wrap a resampled raster for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] unless the raster is exactly
    /// `2^level * tile_size` on both axes.
    pub fn new(raster: &'a RgbaImage, level: u32, tile_size: u32) -> Result<Self, GridError> {
        if tile_size == 0 {
            return Err(GridError::ZeroTileSize);
        }
        let expected =
            level_dimension(level, tile_size).ok_or(GridError::LevelTooDeep { level, tile_size })?;

        let (width, height) = raster.dimensions();
        if width != expected || height != expected {
            return Err(GridError::DimensionMismatch {
                level,
                width,
                height,
                expected,
            });
        }

        Ok(Self {
            raster,
            level,
            tile_size,
            side: expected / tile_size,
        })
    }

    /// Zoom level of this grid.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Tiles per axis.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Tile side length in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Pixel rectangle `[x*T, (x+1)*T) × [y*T, (y+1)*T)` for a grid cell.
    pub fn tile_rect(&self, x: u32, y: u32) -> TileRect {
        debug_assert!(x < self.side && y < self.side);
        let (left, top) = TileCoord::new(self.level, x, y).origin(self.tile_size);
        TileRect {
            x: left,
            y: top,
            width: self.tile_size,
            height: self.tile_size,
        }
    }

    /// Copy the pixels of cell `(x, y)` into a new `tile_size × tile_size` buffer.
    pub fn extract(&self, x: u32, y: u32) -> RgbaImage {
        let rect = self.tile_rect(x, y);
        imageops::crop_imm(self.raster, rect.x, rect.y, rect.width, rect.height).to_image()
    }

    /// Extract every tile of row `y`, left to right.
    ///
    /// Tiles are produced lazily so a caller holds one buffer at a time.
    pub fn row(&self, y: u32) -> impl Iterator<Item = (TileCoord, RgbaImage)> + '_ {
        (0..self.side).map(move |x| (TileCoord::new(self.level, x, y), self.extract(x, y)))
    }
}
