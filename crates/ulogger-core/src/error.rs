//! Error types for ulogger

use thiserror::Error;

/// Main error type for logger construction and decorator configuration
#[derive(Error, Debug)]
pub enum UloggerError {
    /// Strategy tag is not one of `execution`, `exception`, `combined`
    #[error("Unknown instrumentation strategy: {0}")]
    UnknownStrategy(String),

    /// Logger names must be non-empty
    #[error("Logger name must not be empty")]
    InvalidLoggerName,

    /// Configuration document could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sink file could not be created or opened
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using UloggerError
pub type UloggerResult<T> = Result<T, UloggerError>;
