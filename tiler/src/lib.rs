//! Tiler - deep-zoom tile pyramid generation.
//!
//! This library cuts a single source image into a multi-resolution pyramid of
//! fixed-size square tiles. Level `L` covers the source resized to
//! `2^L * tile_size` pixels per side, split into a `2^L × 2^L` grid.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────┐
//! │ Source image │ ──► │  Resampler  │ ──► │   TileGrid   │ ──► │ TileSink │
//! │  (RgbaImage) │     │ (per level) │     │ (per row)    │     │ (files)  │
//! └──────────────┘     └─────────────┘     └──────────────┘     └──────────┘
//!                       └────────────── PyramidGenerator ──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tiler::pyramid::{PyramidConfig, PyramidGenerator};
//! use tiler::resample::Kernel;
//! use tiler::sink::{FileTileSink, NamePattern, TileFormat};
//! use tiler::source::load_source;
//!
//! let source = load_source("photo.png")?;
//! let config = PyramidConfig::new(3)
//!     .with_tile_size(256)
//!     .with_kernel(Kernel::Lanczos3);
//! let sink = FileTileSink::new("tiles", NamePattern::default(), TileFormat::Png);
//!
//! let report = PyramidGenerator::new(config, sink).generate(&source)?;
//! println!("{} tiles written", report.tiles_written());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod logging;
pub mod manifest;
pub mod pyramid;
pub mod resample;
pub mod sink;
pub mod source;
pub mod telemetry;
pub mod tile;

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
