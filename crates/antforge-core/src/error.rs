//! Error types for antforge

use thiserror::Error;

/// Main error type for antforge operations
#[derive(Debug, Error)]
pub enum AntForgeError {
    /// Point set or configuration rejected before any iteration runs
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AntForgeError {
    /// Shorthand for an [`AntForgeError::InvalidInput`] with a formatted message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type alias for antforge operations
pub type Result<T> = std::result::Result<T, AntForgeError>;
