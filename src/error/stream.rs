//! Errors carried on derived streams.
//!
//! A derived stream never errors on its own; the only failure source is the
//! durable store behind it. When a read or write fails, the affected
//! subscription receives [`Event::Error`](crate::observable::Event::Error)
//! with one of these values and is terminated. Sibling subscriptions keep
//! running.

use thiserror::Error;

use super::store::StoreError;

/// Error value delivered to a single subscription.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// A persistence-backed derivation could not access the store.
    #[error("{operation} failed: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    /// Generic stream error.
    #[error("Stream error: {message}")]
    Other { message: String },
}

impl StreamError {
    /// Wrap a store failure raised while evaluating `operation`.
    pub fn storage(operation: &'static str, source: StoreError) -> Self {
        StreamError::Storage { operation, source }
    }

    /// The derivation that failed, if known.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            StreamError::Storage { operation, .. } => Some(operation),
            StreamError::Other { .. } => None,
        }
    }
}
