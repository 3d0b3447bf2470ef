use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Errors that can occur in the application layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The environment held invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The file logger could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}
