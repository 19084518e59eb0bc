//! Effective run settings.
//!
//! Each value is taken from the command line if given, then the config file,
//! then the built-in default.

use std::path::PathBuf;

use tiler::config::ConfigFile;
use tiler::logging::{LoggingConfig, DEFAULT_LOG_LEVEL};
use tiler::pyramid::{PyramidConfig, DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, DEFAULT_TILE_SIZE};
use tiler::resample::Kernel;
use tiler::sink::{NamePattern, TileFormat, DEFAULT_PATTERN};
use tiler::source::source_format;
use tokio_util::sync::CancellationToken;

use crate::args::Cli;
use crate::error::CliError;

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub max_level: u32,
    pub source: PathBuf,
    pub tile_size: u32,
    pub format: TileFormat,
    pub pattern: NamePattern,
    pub kernel: Kernel,
    pub output: PathBuf,
    pub allow_single_level: bool,
    pub manifest: bool,
    pub threads: Option<usize>,
    pub logging: LoggingConfig,
    pub progress: bool,
}

impl Settings {
    /// Merge CLI arguments over the config file and validate the result.
    ///
    /// Fails on anything that can be rejected without touching the disk.
    pub fn resolve(cli: &Cli, config: &ConfigFile) -> Result<Self, CliError> {
        let tiles = &config.tiles;

        let encoding = cli.encoding.or(tiles.encoding).unwrap_or_default();
        let quality = cli.quality.or(tiles.quality).unwrap_or(DEFAULT_QUALITY);
        let format = TileFormat::new(encoding, quality)?;

        let threads = cli.threads.or(tiles.threads);
        if threads == Some(0) {
            return Err(CliError::Config("threads must be at least 1".to_string()));
        }

        source_format(&cli.source)?;

        let settings = Self {
            max_level: cli.max_level,
            source: cli.source.clone(),
            tile_size: cli.size.or(tiles.size).unwrap_or(DEFAULT_TILE_SIZE),
            format,
            pattern: NamePattern::new(
                cli.pattern
                    .clone()
                    .or_else(|| tiles.pattern.clone())
                    .unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            ),
            kernel: cli.interp.or(tiles.interp).unwrap_or_default(),
            output: cli
                .output
                .clone()
                .or_else(|| tiles.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            allow_single_level: cli.allow_single_level
                || tiles.allow_single_level.unwrap_or(false),
            manifest: cli.manifest || tiles.manifest.unwrap_or(false),
            threads,
            logging: LoggingConfig {
                level: cli
                    .log_level
                    .clone()
                    .or_else(|| config.logging.level.clone())
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                file: cli.log_file.clone().or_else(|| config.logging.file.clone()),
            },
            progress: !cli.no_progress,
        };

        settings.pyramid_config(CancellationToken::new()).validate()?;
        Ok(settings)
    }

    /// Build the library config for this run.
    pub fn pyramid_config(&self, cancellation: CancellationToken) -> PyramidConfig {
        PyramidConfig::new(self.max_level)
            .with_tile_size(self.tile_size)
            .with_kernel(self.kernel)
            .with_allow_single_level(self.allow_single_level)
            .with_threads(self.threads)
            .with_cancellation(cancellation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tiler::pyramid::PyramidError;
    use tiler::sink::TileEncoding;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["tiler"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&cli(&["2", "a.png"]), &ConfigFile::default()).unwrap();

        assert_eq!(settings.tile_size, 256);
        assert_eq!(settings.format, TileFormat::Png);
        assert_eq!(settings.pattern.as_str(), "{zoom}_{x}_{y}.png");
        assert_eq!(settings.kernel, Kernel::Bicubic);
        assert_eq!(settings.output, PathBuf::from("tiles"));
        assert!(!settings.manifest);
        assert!(!settings.allow_single_level);
        assert_eq!(settings.threads, None);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.progress);
    }

    #[test]
    fn test_config_file_fills_gaps() {
        let config = ConfigFile::parse(
            "[tiles]\nsize = 128\nencoding = jpeg\nquality = 70\ninterp = Bilinear\nmanifest = yes\n",
        )
        .unwrap();
        let settings = Settings::resolve(&cli(&["2", "a.png"]), &config).unwrap();

        assert_eq!(settings.tile_size, 128);
        assert_eq!(settings.format, TileFormat::Jpeg { quality: 70 });
        assert_eq!(settings.kernel, Kernel::Bilinear);
        assert!(settings.manifest);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let config = ConfigFile::parse(
            "[tiles]\nsize = 128\ninterp = Bilinear\noutput = from-config\n[logging]\nlevel = warn\n",
        )
        .unwrap();
        let settings = Settings::resolve(
            &cli(&["--size", "64", "--interp", "Lanczos2", "-o", "from-cli", "--log-level", "debug", "2", "a.png"]),
            &config,
        )
        .unwrap();

        assert_eq!(settings.tile_size, 64);
        assert_eq!(settings.kernel, Kernel::Lanczos2);
        assert_eq!(settings.output, PathBuf::from("from-cli"));
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_jpeg_default_quality() {
        let settings = Settings::resolve(&cli(&["-e", "jpeg", "1", "a.png"]), &ConfigFile::default()).unwrap();
        assert_eq!(settings.format.encoding(), TileEncoding::Jpeg);
        assert_eq!(settings.format.quality(), Some(5));
    }

    #[test]
    fn test_rejects_bad_quality() {
        let err = Settings::resolve(&cli(&["-e", "jpeg", "-q", "101", "1", "a.png"]), &ConfigFile::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_rejects_zero_size() {
        let err = Settings::resolve(&cli(&["--size", "0", "1", "a.png"]), &ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Pyramid(PyramidError::InvalidTileSize)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_rejects_level_zero_unless_allowed() {
        let err = Settings::resolve(&cli(&["0", "a.png"]), &ConfigFile::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let settings =
            Settings::resolve(&cli(&["--allow-single-level", "0", "a.png"]), &ConfigFile::default()).unwrap();
        assert_eq!(settings.max_level, 0);
    }

    #[test]
    fn test_rejects_unsupported_source() {
        let err = Settings::resolve(&cli(&["1", "photo.jpg"]), &ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Source(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_rejects_zero_threads() {
        let err = Settings::resolve(&cli(&["-j", "0", "1", "a.png"]), &ConfigFile::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_pyramid_config_carries_token() {
        let settings = Settings::resolve(&cli(&["-j", "2", "3", "a.png"]), &ConfigFile::default()).unwrap();
        let token = CancellationToken::new();
        let config = settings.pyramid_config(token.clone());

        assert_eq!(config.max_level(), 3);
        assert_eq!(config.threads(), Some(2));
        token.cancel();
        assert!(config.cancellation().is_cancelled());
    }
}
