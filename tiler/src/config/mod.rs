//! Configuration file support.
//!
//! Settings may come from an INI file passed with `--config`:
//!
//! ```ini
//! [tiles]
//! size = 512
//! encoding = jpeg
//! quality = 85
//! pattern = {zoom}/{x}/{y}.jpg
//! interp = Lanczos3
//! output = /srv/tiles
//! allow_single_level = false
//! manifest = true
//! threads = 8
//!
//! [logging]
//! level = debug
//! file = /var/log/tiler.log
//! ```
//!
//! Every key is optional. Values present in the file sit between command-line
//! flags and built-in defaults: CLI > config file > default.

mod file;

pub use file::{ConfigFile, ConfigFileError, LoggingSection, TilesSection};
