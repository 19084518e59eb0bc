//! Pyramid generation.
//!
//! [`PyramidGenerator`] drives the whole run: for every level it resamples the
//! original source to `2^level * tile_size` pixels, cuts the result into a
//! `2^level × 2^level` grid and hands each tile to a [`TileSink`].
//!
//! # Concurrency
//!
//! ```text
//! generate()
//!   └─ par_iter over levels ────────── join
//!        └─ resize(source) once per level
//!        └─ par_iter over rows ─────── join
//!             └─ columns in order, one tile buffer at a time
//! ```
//!
//! Both layers are rayon fork-join, so each parent waits for all of its
//! children before returning. The cancellation token in [`PyramidConfig`] is
//! checked before every level, row and tile.
//!
//! [`TileSink`]: crate::sink::TileSink

mod config;
mod driver;
mod error;
mod report;

pub use config::{PyramidConfig, DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, DEFAULT_TILE_SIZE};
pub use driver::PyramidGenerator;
pub use error::PyramidError;
pub use report::{LevelSummary, PyramidReport, TileFailure};
