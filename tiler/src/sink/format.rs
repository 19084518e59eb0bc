//! Tile image formats.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};
use serde::Serialize;
use thiserror::Error;

/// Lowest accepted JPEG quality.
pub const MIN_JPEG_QUALITY: u32 = 1;

/// Highest accepted JPEG quality.
pub const MAX_JPEG_QUALITY: u32 = 100;

/// Encoding selected on the command line or in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileEncoding {
    #[default]
    Png,
    Jpeg,
}

/// Error returned when parsing an unrecognised encoding name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported encoding '{name}' (valid: png, jpeg)")]
pub struct UnsupportedEncoding {
    pub name: String,
}

impl TileEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TileEncoding::Png => "png",
            TileEncoding::Jpeg => "jpeg",
        }
    }
}

impl fmt::Display for TileEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileEncoding {
    type Err = UnsupportedEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(TileEncoding::Png),
            "jpeg" => Ok(TileEncoding::Jpeg),
            _ => Err(UnsupportedEncoding {
                name: s.to_string(),
            }),
        }
    }
}

/// Errors building a [`TileFormat`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("jpeg quality {0} is outside 1-100")]
    QualityOutOfRange(u32),
}

/// Fully parameterised output format.
///
/// PNG is lossless and takes no options; JPEG carries a quality in 1–100.
/// JPEG has no alpha channel, so tiles are flattened to RGB before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileFormat {
    #[default]
    Png,
    Jpeg { quality: u8 },
}

impl TileFormat {
    /// Build a format from an encoding and a quality setting.
    ///
    /// The quality is only validated for lossy encodings; PNG ignores it.
    ///
    /// # Example
    ///
    /// ```
    /// use tiler::sink::{TileEncoding, TileFormat};
    ///
    /// assert_eq!(TileFormat::new(TileEncoding::Png, 0), Ok(TileFormat::Png));
    /// assert_eq!(
    ///     TileFormat::new(TileEncoding::Jpeg, 80),
    ///     Ok(TileFormat::Jpeg { quality: 80 })
    /// );
    /// assert!(TileFormat::new(TileEncoding::Jpeg, 101).is_err());
    /// ```
    pub fn new(encoding: TileEncoding, quality: u32) -> Result<Self, FormatError> {
        match encoding {
            TileEncoding::Png => Ok(TileFormat::Png),
            TileEncoding::Jpeg => {
                if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality) {
                    return Err(FormatError::QualityOutOfRange(quality));
                }
                Ok(TileFormat::Jpeg {
                    quality: quality as u8,
                })
            }
        }
    }

    pub fn encoding(&self) -> TileEncoding {
        match self {
            TileFormat::Png => TileEncoding::Png,
            TileFormat::Jpeg { .. } => TileEncoding::Jpeg,
        }
    }

    /// Quality for lossy formats.
    pub fn quality(&self) -> Option<u8> {
        match self {
            TileFormat::Png => None,
            TileFormat::Jpeg { quality } => Some(*quality),
        }
    }

    /// Encode `tile` into `writer`.
    pub fn encode<W: Write>(&self, writer: W, tile: &RgbaImage) -> Result<(), image::ImageError> {
        let (width, height) = tile.dimensions();
        match self {
            TileFormat::Png => PngEncoder::new(writer).write_image(
                tile.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            ),
            TileFormat::Jpeg { quality } => {
                let rgb: RgbImage = tile.convert();
                JpegEncoder::new_with_quality(writer, *quality).write_image(
                    rgb.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )
            }
        }
    }
}
