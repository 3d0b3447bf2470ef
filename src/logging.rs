//! File logging. The terminal belongs to the UI, so log records go to a file.

use std::fs::{self, File};
use std::path::Path;

use simplelog::{Config as LogConfig, WriteLogger};

use crate::config::Config;

/// Errors that can occur while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log file or its directory could not be created.
    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global logger was already installed.
    #[error("logger already initialized: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// Creates (or truncates) the log file, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

/// Installs the global file logger described by `config`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(config: &Config) -> Result<(), LoggingError> {
    let file = open_log_file(&config.log_file)?;
    WriteLogger::init(config.log_level, LogConfig::default(), file)?;
    log::info!(
        "logging to {} at level {}",
        config.log_file.display(),
        config.log_level
    );
    Ok(())
}
