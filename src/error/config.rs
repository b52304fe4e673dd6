//! Configuration and logging setup errors.

use thiserror::Error;

/// Errors raised while building a [`Config`](crate::config::Config) or
/// installing the logging subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting has a value that cannot be used.
    #[error("Invalid value for {name}: {message}")]
    InvalidValue { name: &'static str, message: String },

    /// No store path was configured and the home directory is unknown.
    #[error("Could not determine home directory for the default store path")]
    NoHomeDirectory,

    /// The global tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
