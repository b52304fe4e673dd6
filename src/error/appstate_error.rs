//! Unified error type for the crate.

use thiserror::Error;

use super::category::ErrorCategory;
use super::cli::CliError;
use super::config::ConfigError;
use super::store::StoreError;
use super::stream::StreamError;

/// Unified error type.
///
/// Library operations return their narrow error type; this enum exists for
/// callers (the demo binary, host glue) that want one type to propagate.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// Durable storage errors.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Errors surfaced on derived streams.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Command-line errors.
    #[error(transparent)]
    Cli(#[from] CliError),
}

impl AppStateError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppStateError::Store(_) => ErrorCategory::Storage,
            AppStateError::Stream(StreamError::Storage { .. }) => ErrorCategory::Storage,
            AppStateError::Stream(_) => ErrorCategory::Stream,
            AppStateError::Config(_) => ErrorCategory::Configuration,
            AppStateError::Cli(_) => ErrorCategory::User,
        }
    }

    /// Check if the failed operation can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppStateError::Store(err) => err.is_retryable(),
            AppStateError::Stream(StreamError::Storage { source, .. }) => source.is_retryable(),
            _ => self.category().is_retryable(),
        }
    }

    /// Short machine-readable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppStateError::Store(err) => err.error_code(),
            AppStateError::Stream(StreamError::Storage { source, .. }) => source.error_code(),
            AppStateError::Stream(_) => "STREAM_OTHER",
            AppStateError::Config(_) => "CONFIG_INVALID",
            AppStateError::Cli(_) => "CLI_USAGE",
        }
    }
}
