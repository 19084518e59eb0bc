//! Source image loading.
//!
//! Only PNG and BMP sources are accepted. The format is chosen from the file
//! extension (case-insensitive) before the file is opened, so an unsupported
//! source fails without touching the disk.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use tracing::debug;

/// Errors from loading a source image.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Extension is not one of the supported formats.
    #[error("unsupported source format '{extension}' for {path} (valid: png, bmp)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to open source {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode source {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Decoded image has a zero dimension.
    #[error("source {path} has no pixels")]
    Empty { path: PathBuf },
}

impl SourceError {
    /// Whether the source was rejected before any I/O happened.
    pub fn is_config_error(&self) -> bool {
        matches!(self, SourceError::UnsupportedFormat { .. })
    }
}

/// Decoder format for a source path, chosen by extension.
pub fn source_format(path: &Path) -> Result<ImageFormat, SourceError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => Ok(ImageFormat::Png),
        "bmp" => Ok(ImageFormat::Bmp),
        _ => Err(SourceError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Load and decode a source image as RGBA8.
pub fn load_source(path: impl AsRef<Path>) -> Result<RgbaImage, SourceError> {
    let path = path.as_ref();
    let format = source_format(path)?;

    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let raster = image::load(BufReader::new(file), format)
        .map_err(|source| SourceError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();

    if raster.width() == 0 || raster.height() == 0 {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        format = ?format,
        width = raster.width(),
        height = raster.height(),
        "Source loaded"
    );
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(6, 4, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 7, 255]))
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(source_format(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(source_format(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(source_format(Path::new("dir/b.Bmp")).unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn test_unsupported_extensions() {
        for name in ["photo.jpg", "scan.tiff", "noext", "archive.png.gz"] {
            let err = source_format(Path::new(name)).unwrap_err();
            assert!(err.is_config_error(), "{}", name);
        }
    }

    #[test]
    fn test_unsupported_message_lists_formats() {
        let err = source_format(Path::new("x.gif")).unwrap_err();
        assert!(err.to_string().contains("'gif'"));
        assert!(err.to_string().contains("png, bmp"));
    }

    #[test]
    fn test_load_png() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("source.png");
        sample().save(&path).unwrap();

        assert_eq!(load_source(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_bmp_uppercase_extension() {
        let temp = TempDir::new().unwrap();
        let written = temp.path().join("source.bmp");
        sample().save(&written).unwrap();
        let path = temp.path().join("SOURCE.BMP");
        std::fs::rename(&written, &path).unwrap();

        let raster = load_source(&path).unwrap();
        assert_eq!(raster.dimensions(), (6, 4));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_source(temp.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, SourceError::Open { .. }));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_source(&path).unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
    }
}
