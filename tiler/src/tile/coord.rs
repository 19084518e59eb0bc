//! Tile coordinate types and level arithmetic.

use std::fmt;

use serde::Serialize;

/// Position of one tile within the pyramid.
///
/// `x` grows eastward (columns) and `y` grows southward (rows), both in
/// `[0, 2^level)`.
///
/// # Example
///
/// ```
/// use tiler::tile::TileCoord;
///
/// let coord = TileCoord::new(2, 3, 1);
/// assert_eq!(coord.origin(256), (768, 256));
/// assert_eq!(coord.to_string(), "2/3/1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileCoord {
    /// Zoom level
    pub level: u32,
    /// Column within the level grid
    pub x: u32,
    /// Row within the level grid
    pub y: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(level: u32, x: u32, y: u32) -> Self {
        Self { level, x, y }
    }

    /// Top-left pixel of this tile inside the level raster.
    pub fn origin(&self, tile_size: u32) -> (u32, u32) {
        (self.x * tile_size, self.y * tile_size)
    }

    /// Whether `x` and `y` fall inside the grid of this coordinate's level.
    pub fn is_valid(&self) -> bool {
        match grid_side(self.level) {
            Some(side) => self.x < side && self.y < side,
            None => false,
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.level, self.x, self.y)
    }
}

/// Number of tiles along one axis at `level` (`2^level`).
///
/// Returns `None` when the side does not fit in a `u32`.
#[inline]
pub fn grid_side(level: u32) -> Option<u32> {
    1u32.checked_shl(level)
}

/// Pixel side length of the resampled raster at `level`.
///
/// Returns `None` when `2^level * tile_size` overflows a `u32`.
#[inline]
pub fn level_dimension(level: u32, tile_size: u32) -> Option<u32> {
    grid_side(level)?.checked_mul(tile_size)
}

/// Total tiles in a pyramid of levels `0..=max_level` (`Σ 4^L`).
///
/// Saturates at `u64::MAX` for absurdly deep pyramids.
pub fn expected_tile_count(max_level: u32) -> u64 {
    (0..=max_level).fold(0u64, |total, level| {
        let per_level = 1u64.checked_shl(2 * level).unwrap_or(u64::MAX);
        total.saturating_add(per_level)
    })
}

/// Every coordinate of `level` in row-major order.
pub fn level_coords(level: u32) -> impl Iterator<Item = TileCoord> {
    let side = grid_side(level).unwrap_or(0);
    (0..side).flat_map(move |y| (0..side).map(move |x| TileCoord::new(level, x, y)))
}
