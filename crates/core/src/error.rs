//! Error types for rpt-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for rpt-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for rpt-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Writing to stdout or stderr failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Reporter configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A start instant could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_) | Error::InvalidTimestamp(_) => 2, // UsageError
            Error::Io(_) => 74,                                        // OutputError
        }
    }
}
