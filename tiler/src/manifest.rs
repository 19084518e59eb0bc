//! Run manifest.
//!
//! When requested, a `manifest.json` describing the run is written next to
//! the tiles so viewers and follow-up jobs can discover the pyramid layout
//! without scanning the directory.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::pyramid::{PyramidConfig, PyramidReport, TileFailure};
use crate::resample::Kernel;
use crate::sink::{TileEncoding, TileFormat};

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write manifest {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Per-level entry of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestLevel {
    pub level: u32,
    pub side: u32,
    pub tiles_written: u64,
    pub tiles_failed: u64,
    pub tiles_skipped: u64,
}

/// Description of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub version: String,
    pub source_width: u32,
    pub source_height: u32,
    pub tile_size: u32,
    pub max_level: u32,
    pub encoding: TileEncoding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    pub pattern: String,
    pub kernel: Kernel,
    pub cancelled: bool,
    pub levels: Vec<ManifestLevel>,
    pub failures: Vec<TileFailure>,
}

impl Manifest {
    pub fn from_run(
        source_dimensions: (u32, u32),
        config: &PyramidConfig,
        format: TileFormat,
        pattern: &str,
        report: &PyramidReport,
    ) -> Self {
        Self {
            version: crate::VERSION.to_string(),
            source_width: source_dimensions.0,
            source_height: source_dimensions.1,
            tile_size: config.tile_size(),
            max_level: config.max_level(),
            encoding: format.encoding(),
            quality: format.quality(),
            pattern: pattern.to_string(),
            kernel: config.kernel(),
            cancelled: report.cancelled,
            levels: report
                .levels
                .iter()
                .map(|l| ManifestLevel {
                    level: l.level,
                    side: l.side,
                    tiles_written: l.tiles_written,
                    tiles_failed: l.tiles_failed,
                    tiles_skipped: l.tiles_skipped,
                })
                .collect(),
            failures: report.failures().cloned().collect(),
        }
    }

    /// Write `manifest.json` into `dir`, replacing any previous one.
    ///
    /// Returns the path written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ManifestError> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let temp_path = path.with_extension("json.tmp");
        let write_err = |source| ManifestError::Write {
            path: temp_path.clone(),
            source,
        };

        let file = File::create(&temp_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        drop(writer);

        if let Err(source) = std::fs::rename(&temp_path, &path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(ManifestError::Write { path, source });
        }
        Ok(path)
    }
}
