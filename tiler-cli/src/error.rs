//! CLI error type.

use std::fmt;
use std::io;
use std::path::PathBuf;

use tiler::config::ConfigFileError;
use tiler::logging::LoggingError;
use tiler::manifest::ManifestError;
use tiler::pyramid::PyramidError;
use tiler::sink::FormatError;
use tiler::source::SourceError;

/// Exit code for invalid arguments or configuration.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for I/O failures before or after generation.
pub const EXIT_IO: u8 = 1;

/// Errors that end the CLI before a report can be produced.
#[derive(Debug)]
pub enum CliError {
    /// Invalid setting not covered by a library error.
    Config(String),

    /// Config file could not be read or parsed.
    ConfigFile(ConfigFileError),

    /// Logging could not be initialised.
    Logging(LoggingError),

    /// Output directory could not be created.
    OutputDir { path: PathBuf, source: io::Error },

    /// Source image could not be loaded.
    Source(SourceError),

    /// Pyramid generation failed as a whole.
    Pyramid(PyramidError),

    /// Manifest could not be written.
    Manifest(ManifestError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) | CliError::ConfigFile(_) => EXIT_CONFIG,
            CliError::Logging(LoggingError::InvalidFilter { .. }) => EXIT_CONFIG,
            CliError::Logging(_) => EXIT_IO,
            CliError::OutputDir { .. } => EXIT_IO,
            CliError::Source(e) if e.is_config_error() => EXIT_CONFIG,
            CliError::Source(_) => EXIT_IO,
            CliError::Pyramid(e) if e.is_config_error() => EXIT_CONFIG,
            CliError::Pyramid(_) => EXIT_IO,
            CliError::Manifest(_) => EXIT_IO,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "Configuration error: {}", e),
            CliError::Logging(e) => write!(f, "Failed to initialise logging: {}", e),
            CliError::OutputDir { path, source } => {
                write!(
                    f,
                    "Failed to create output directory {}: {}",
                    path.display(),
                    source
                )
            }
            CliError::Source(e) => write!(f, "{}", e),
            CliError::Pyramid(e) if e.is_config_error() => {
                write!(f, "Configuration error: {}", e)
            }
            CliError::Pyramid(e) => write!(f, "Pyramid generation failed: {}", e),
            CliError::Manifest(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::ConfigFile(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::OutputDir { source, .. } => Some(source),
            CliError::Source(e) => Some(e),
            CliError::Pyramid(e) => Some(e),
            CliError::Manifest(e) => Some(e),
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}

impl From<PyramidError> for CliError {
    fn from(e: PyramidError) -> Self {
        CliError::Pyramid(e)
    }
}

impl From<FormatError> for CliError {
    fn from(e: FormatError) -> Self {
        CliError::Pyramid(PyramidError::Format(e))
    }
}

impl From<ManifestError> for CliError {
    fn from(e: ManifestError) -> Self {
        CliError::Manifest(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_errors_exit_2() {
        assert_eq!(CliError::Config("bad".to_string()).exit_code(), 2);
        assert_eq!(
            CliError::from(PyramidError::InvalidTileSize).exit_code(),
            2
        );
        assert_eq!(CliError::from(FormatError::QualityOutOfRange(0)).exit_code(), 2);

        let unsupported = tiler::source::source_format(Path::new("a.gif")).unwrap_err();
        assert_eq!(CliError::from(unsupported).exit_code(), 2);
    }

    #[test]
    fn test_io_errors_exit_1() {
        let err = CliError::OutputDir {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_code(), 1);

        let err = CliError::from(PyramidError::EmptySource);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_display() {
        let err = CliError::Config("threads must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: threads must be at least 1"
        );

        let err = CliError::from(PyramidError::LevelTooShallow {
            requested: 0,
            minimum: 1,
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: level must be at least 1 (got 0)"
        );

        let err = CliError::from(PyramidError::EmptySource);
        assert_eq!(err.to_string(), "Pyramid generation failed: source image is empty");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = CliError::from(PyramidError::InvalidTileSize);
        assert!(err.source().is_some());
        assert!(CliError::Config("x".to_string()).source().is_none());
    }
}
