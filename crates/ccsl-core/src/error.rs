//! Error types for ccsl operations.
//!
//! The metrics pipeline itself never fails (all degradation is to defaults);
//! errors exist only at the process boundary, where they map onto the exit
//! codes: 1 for configuration errors, 2 for input errors.

use thiserror::Error;

/// Result type alias using [`CcslError`].
pub type Result<T> = std::result::Result<T, CcslError>;

/// Errors surfaced at the ccsl process boundary.
#[derive(Debug, Error)]
pub enum CcslError {
    /// Invalid command-line or environment configuration (exit code 1)
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Missing or unusable stdin input (exit code 2)
    #[error("input error: {message}")]
    Input { message: String },

    /// Invalid JSON on stdin (exit code 2)
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure reading stdin (exit code 2)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CcslError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config { .. } => 1,
            Self::Input { .. } | Self::Json(_) | Self::Io(_) => 2,
        }
    }
}
