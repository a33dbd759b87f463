/// Structured error types for the rosterd-core library.
///
/// Uses `thiserror` for composable errors. The binary crate
/// (rosterd-cli) wraps these in `anyhow` for convenience.
use std::io;
use thiserror::Error;

/// Main error type for rosterd-core operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// A field constraint was violated during employee construction
    #[error("{reason}")]
    Validation { reason: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for rosterd-core operations
pub type Result<T> = std::result::Result<T, RosterError>;

impl RosterError {
    /// Create a validation error with a human-readable reason
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
