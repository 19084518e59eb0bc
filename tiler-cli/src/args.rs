//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use tiler::resample::Kernel;
use tiler::sink::TileEncoding;

/// Cut an image into a deep-zoom tile pyramid.
///
/// Level L is the source resized to 2^L * SIZE pixels per side and split into
/// a 2^L x 2^L grid of SIZE x SIZE tiles.
#[derive(Debug, Parser)]
#[command(name = "tiler", version, about, long_about = None)]
pub struct Cli {
    /// Deepest zoom level to generate
    #[arg(value_name = "MAX_LEVEL")]
    pub max_level: u32,

    /// Source image (.png or .bmp)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Tile side length in pixels [default: 256]
    #[arg(long, value_name = "PIXELS")]
    pub size: Option<u32>,

    /// JPEG quality, 1-100 [default: 5]
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// Tile encoding: png or jpeg [default: png]
    #[arg(short, long)]
    pub encoding: Option<TileEncoding>,

    /// Output filename pattern; {zoom}, {x} and {y} are substituted [default: {zoom}_{x}_{y}.png]
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Interpolation: NearestNeighbor, Bilinear, Bicubic, MitchellNetravali, Lanczos2, Lanczos3 [default: Bicubic]
    #[arg(long, value_name = "KERNEL")]
    pub interp: Option<Kernel>,

    /// Output directory, created if missing [default: tiles]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// INI config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write manifest.json into the output directory
    #[arg(long)]
    pub manifest: bool,

    /// Accept MAX_LEVEL = 0 (a single tile)
    #[arg(long)]
    pub allow_single_level: bool,

    /// Worker threads [default: one per core]
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Log filter, e.g. info or tiler=debug (RUST_LOG takes precedence) [default: info]
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}
