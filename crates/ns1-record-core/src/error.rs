//! Error types for the record mapper
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for record operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the record mapper
#[derive(Error, Debug)]
pub enum Error {
    /// Mutually exclusive settings were combined, or a record already exists
    #[error("{0}")]
    Conflict(String),

    /// Malformed configuration value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Remote client failure, passed through unchanged
    #[error("Client error ({client}): {message}")]
    Client {
        /// Client name
        client: String,
        /// Error message
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a client-specific error
    pub fn client(client: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Client {
            client: client.into(),
            message: message.into(),
        }
    }

    /// Whether this error is the link/answers (or duplicate record) conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Helper for converting anyhow::Error from host client libraries
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_is_verbatim() {
        let err = Error::conflict("Cannot have both link and answers in a record");
        assert_eq!(err.to_string(), "Cannot have both link and answers in a record");
        assert!(err.is_conflict());
    }

    #[test]
    fn test_client_error_display() {
        let err = Error::client("ns1", "zone not found");
        assert_eq!(err.to_string(), "Client error (ns1): zone not found");
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: Error = anyhow::anyhow!("socket closed").into();
        assert!(matches!(err, Error::Other(ref m) if m == "socket closed"));
    }
}
