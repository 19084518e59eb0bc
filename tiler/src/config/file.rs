//! INI config file parsing.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};
use thiserror::Error;

use crate::resample::Kernel;
use crate::sink::TileEncoding;

const TILES_SECTION: &str = "tiles";
const LOGGING_SECTION: &str = "logging";

/// Errors from reading a config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {path}: {source}")]
    Load { path: PathBuf, source: ini::Error },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    /// A key is present but its value cannot be used.
    #[error("invalid value '{value}' for {section}.{key}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

/// `[tiles]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TilesSection {
    pub size: Option<u32>,
    pub quality: Option<u32>,
    pub encoding: Option<TileEncoding>,
    pub pattern: Option<String>,
    pub interp: Option<Kernel>,
    pub output: Option<PathBuf>,
    pub allow_single_level: Option<bool>,
    pub manifest: Option<bool>,
    pub threads: Option<usize>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

/// Parsed config file. Unknown sections and keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub tiles: TilesSection,
    pub logging: LoggingSection,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let ini = Ini::load_from_file_noescape(path).map_err(|source| ConfigFileError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str_noescape(content)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = ConfigFile::default();

        if let Some(props) = ini.section(Some(TILES_SECTION)) {
            let section = Section::new(TILES_SECTION, props);
            config.tiles = TilesSection {
                size: section.parsed("size")?,
                quality: section.parsed("quality")?,
                encoding: section.parsed("encoding")?,
                pattern: section.string("pattern"),
                interp: section.parsed("interp")?,
                output: section.string("output").map(PathBuf::from),
                allow_single_level: section.flag("allow_single_level")?,
                manifest: section.flag("manifest")?,
                threads: section.parsed("threads")?,
            };
            if config.tiles.size == Some(0) {
                return Err(section.invalid("size", "0"));
            }
            if config.tiles.threads == Some(0) {
                return Err(section.invalid("threads", "0"));
            }
        }

        if let Some(props) = ini.section(Some(LOGGING_SECTION)) {
            let section = Section::new(LOGGING_SECTION, props);
            config.logging = LoggingSection {
                level: section.string("level"),
                file: section.string("file").map(PathBuf::from),
            };
        }

        Ok(config)
    }
}

/// One INI section with typed accessors.
struct Section<'a> {
    name: &'a str,
    props: &'a Properties,
}

impl<'a> Section<'a> {
    fn new(name: &'a str, props: &'a Properties) -> Self {
        Self { name, props }
    }

    fn raw(&self, key: &str) -> Option<&'a str> {
        self.props
            .get(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn string(&self, key: &str) -> Option<String> {
        self.raw(key).map(str::to_string)
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, ConfigFileError> {
        match self.raw(key) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(key, value)),
            None => Ok(None),
        }
    }

    fn flag(&self, key: &str) -> Result<Option<bool>, ConfigFileError> {
        match self.raw(key) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Some(true)),
                "false" | "no" | "off" | "0" => Ok(Some(false)),
                _ => Err(self.invalid(key, value)),
            },
            None => Ok(None),
        }
    }

    fn invalid(&self, key: &str, value: &str) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
