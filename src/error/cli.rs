//! Command-line and demo input errors.

use thiserror::Error;

/// Errors raised while parsing arguments or demo input lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// A flag that takes a value was given none.
    #[error("Missing value for {0}")]
    MissingValue(String),

    /// The flag is not recognized.
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    /// A demo input line does not name a lifecycle notification.
    #[error("Unknown notification: {0}")]
    UnknownNotification(String),
}
