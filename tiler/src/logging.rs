//! Logging setup.
//!
//! Installs a `tracing` subscriber that writes human-readable lines to stderr
//! and, optionally, to a log file through a non-blocking writer. `RUST_LOG`
//! takes precedence over the configured level when it is set.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a level is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("invalid log file path {0}")]
    InvalidFile(PathBuf),

    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        source: tracing_appender::rolling::InitError,
    },

    #[error("failed to install logger: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `tiler=debug,warn`.
    pub level: String,
    /// Optional file that receives a copy of every log line.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Keeps the background file writer alive.
///
/// Hold it until the process exits; dropping it flushes buffered lines.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if the filter does not parse, the log file cannot be opened, or a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = resolve_filter(&config.level, std::env::var("RUST_LOG").ok())?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )));

    let (file_layer, file_guard) = match &config.file {
        Some(path) => {
            let appender = open_log_file(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::new(time::macros::format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
                )));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(LoggingGuard { _file: file_guard })
}

/// Pick the environment filter if present, otherwise the configured level.
fn resolve_filter(level: &str, env: Option<String>) -> Result<EnvFilter, LoggingError> {
    let directive = match env {
        Some(env) if !env.trim().is_empty() => env,
        _ if level.trim().is_empty() => DEFAULT_LOG_LEVEL.to_string(),
        _ => level.to_string(),
    };
    EnvFilter::try_new(&directive).map_err(|source| LoggingError::InvalidFilter {
        filter: directive,
        source,
    })
}

/// Split a log path into its directory and file name.
fn split_log_path(path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| LoggingError::InvalidFile(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name))
}

fn open_log_file(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let (dir, name) = split_log_path(path)?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.file.is_none());
    }

    #[test]
    fn test_filter_prefers_env() {
        let filter = resolve_filter("info", Some("tiler=trace".to_string())).unwrap();
        assert_eq!(filter.to_string(), "tiler=trace");
    }

    #[test]
    fn test_filter_falls_back_to_level() {
        let filter = resolve_filter("debug", None).unwrap();
        assert_eq!(filter.to_string(), "debug");

        let filter = resolve_filter("warn", Some("  ".to_string())).unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_empty_level_uses_default() {
        let filter = resolve_filter("", None).unwrap();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn test_invalid_filter() {
        let err = resolve_filter("tiler=loud", None).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidFilter { .. }));
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/tiler.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, "tiler.log");

        let (dir, name) = split_log_path(Path::new("tiler.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "tiler.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_open_log_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.log");

        let _appender = open_log_file(&path).unwrap();
        assert!(path.is_file());
    }
}
