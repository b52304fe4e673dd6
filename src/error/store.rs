//! Durable key-value storage errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::traits::KeyValueStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("IO error accessing {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    /// The backing file exists but does not contain a valid key-value document.
    #[error("Failed to (de)serialize store: {0}")]
    Serialization(String),

    /// The key holds a value of a different type than requested.
    #[error("Key '{key}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Build an [`StoreError::Io`] from an `std::io::Error`.
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Io { .. } | StoreError::Unavailable(_))
    }

    /// Short machine-readable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "STORE_IO",
            StoreError::Serialization(_) => "STORE_SERIALIZATION",
            StoreError::TypeMismatch { .. } => "STORE_TYPE_MISMATCH",
            StoreError::Unavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
