//! Error types and handling for kwlog
//!
//! Every failure inside a logging session is terminal. This module defines the
//! error type used throughout the crate and the mapping from an error onto the
//! session outcome reported to the caller.

use crate::logger::SessionResult;
use thiserror::Error;

/// Result type alias for kwlog operations
pub type Result<T> = std::result::Result<T, KwLogError>;

/// Main error type for kwlog
#[derive(Debug, Error)]
pub enum KwLogError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Transport not operational, closed channel or malformed exchange
    #[error("Communication error: {message}")]
    Communication { message: String },

    /// No response within the allowed window
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Log sink rejected a line
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A line would exceed its capacity contract
    #[error("Capacity error: {message}")]
    Capacity { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl KwLogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        KwLogError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        KwLogError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new communication error
    pub fn communication<S: Into<String>>(message: S) -> Self {
        KwLogError::Communication {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        KwLogError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        KwLogError::Storage {
            message: message.into(),
        }
    }

    /// Create a new capacity error
    pub fn capacity<S: Into<String>>(message: S) -> Self {
        KwLogError::Capacity {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        KwLogError::Io {
            message: message.into(),
        }
    }

    /// Terminal session outcome this error leads to.
    ///
    /// All transport failures collapse into `CommunicationError`; anything that
    /// prevents a line from reaching storage is a `StorageError`.
    pub fn session_result(&self) -> SessionResult {
        match self {
            KwLogError::Communication { .. } | KwLogError::Timeout { .. } => {
                SessionResult::CommunicationError
            }
            KwLogError::Storage { .. }
            | KwLogError::Capacity { .. }
            | KwLogError::Io { .. }
            | KwLogError::Config { .. }
            | KwLogError::Validation { .. }
            | KwLogError::Serialization { .. } => SessionResult::StorageError,
        }
    }
}

impl From<std::io::Error> for KwLogError {
    fn from(err: std::io::Error) -> Self {
        KwLogError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for KwLogError {
    fn from(err: serde_yaml::Error) -> Self {
        KwLogError::Serialization {
            message: err.to_string(),
        }
    }
}
