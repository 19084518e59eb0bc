//! Tile addressing and grid partitioning.
//!
//! A pyramid level `L` is a `side × side` grid of tiles where `side = 2^L`.
//! [`TileCoord`] names one tile, and [`TileGrid`] cuts a resampled level
//! raster into independent tile buffers.
//!
//! ```text
//! level 0        level 1           level 2
//! ┌─────┐        ┌──┬──┐           ┌─┬─┬─┬─┐
//! │0,0  │        │  │  │           ├─┼─┼─┼─┤
//! │     │        ├──┼──┤           ├─┼─┼─┼─┤
//! └─────┘        │  │  │           ├─┼─┼─┼─┤
//!                └──┴──┘           └─┴─┴─┴─┘
//! ```

mod coord;
mod grid;

pub use coord::{expected_tile_count, grid_side, level_coords, level_dimension, TileCoord};
pub use grid::{GridError, TileGrid, TileRect};
