//! Filesystem tile sink.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::trace;

use super::{NamePattern, TileError, TileFormat, TileSink};
use crate::tile::TileCoord;

/// Writes each tile to `<output_dir>/<pattern rendered for the coordinate>`.
///
/// Tiles are encoded in memory, written to a hidden temporary file next to
/// the destination, then renamed over it. The temporary name includes the
/// coordinate, so concurrent writers never share a temporary file even when
/// the pattern maps them to the same destination; the destination then holds
/// whichever tile was renamed last.
///
/// Directories implied by the pattern (for example `{zoom}/{x}/{y}.png`) are
/// created on demand.
///
/// # Example
///
/// ```no_run
/// use tiler::sink::{FileTileSink, NamePattern, TileFormat};
/// use tiler::tile::TileCoord;
///
/// let sink = FileTileSink::new("tiles", NamePattern::default(), TileFormat::Png);
/// assert_eq!(
///     sink.tile_path(TileCoord::new(2, 3, 1)),
///     std::path::Path::new("tiles/2_3_1.png")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FileTileSink {
    output_dir: PathBuf,
    pattern: NamePattern,
    format: TileFormat,
}

impl FileTileSink {
    pub fn new(output_dir: impl Into<PathBuf>, pattern: NamePattern, format: TileFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            pattern,
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    pub fn format(&self) -> TileFormat {
        self.format
    }

    /// Destination path for a tile.
    pub fn tile_path(&self, coord: TileCoord) -> PathBuf {
        self.output_dir.join(self.pattern.render(coord))
    }

    fn temp_path(path: &Path, coord: TileCoord) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(
            ".{}.{}-{}-{}.tmp",
            name, coord.level, coord.x, coord.y
        ))
    }
}

impl TileSink for FileTileSink {
    fn write_tile(&self, coord: TileCoord, tile: &RgbaImage) -> Result<u64, TileError> {
        let path = self.tile_path(coord);

        let mut bytes = Vec::new();
        self.format.encode(&mut bytes, tile)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|source| TileError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let temp = Self::temp_path(&path, coord);
        fs::write(&temp, &bytes).map_err(|source| TileError::Write {
            path: temp.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&temp, &path) {
            let _ = fs::remove_file(&temp);
            return Err(TileError::Persist { path, source });
        }

        trace!(tile = %coord, path = %path.display(), bytes = bytes.len(), "Tile written");
        Ok(bytes.len() as u64)
    }
}
