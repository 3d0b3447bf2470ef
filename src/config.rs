//! Runtime configuration read from environment variables.
//!
//! - `FORMARRAY_LOG`: log level filter (`off`, `error`, `warn`, `info`,
//!   `debug`, `trace`); defaults to `info`.
//! - `FORMARRAY_LOG_FILE`: log file path; defaults to
//!   `<cache dir>/formarray/formarray.log`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "FORMARRAY_LOG";
/// Environment variable holding the log file path.
pub const LOG_FILE_VAR: &str = "FORMARRAY_LOG_FILE";

const LOG_FILE_NAME: &str = "formarray.log";

/// Errors that can occur while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The log level variable holds something other than a level name.
    #[error("invalid log level in FORMARRAY_LOG: {0:?}")]
    InvalidLogLevel(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Config {
    /// Reads configuration from the process environment.
    #[mutants::skip]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR).filter(|s| !s.trim().is_empty()) {
            Some(raw) => LevelFilter::from_str(raw.trim())
                .map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => LevelFilter::Info,
        };
        let log_file = lookup(LOG_FILE_VAR)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_file);
        Ok(Self {
            log_level,
            log_file,
        })
    }
}

/// Returns `<cache dir>/formarray/formarray.log`, or the temp dir when the
/// platform has no cache directory.
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("formarray"))
        .unwrap_or_else(env::temp_dir)
        .join(LOG_FILE_NAME)
}
