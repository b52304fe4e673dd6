//! Error category classification for unified error handling.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Durable key-value storage could not be read or written.
    /// May succeed on retry if the underlying medium recovers.
    Storage,

    /// A derived stream terminated with an error value.
    Stream,

    /// Configuration errors (invalid environment values, missing home directory).
    /// Not retryable until configuration is corrected.
    Configuration,

    /// User action required (unknown flag, unknown notification name).
    User,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Storage)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Storage => "storage",
            ErrorCategory::Stream => "stream",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::User => "user",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Storage => "Check that the store file is writable and not corrupted.",
            ErrorCategory::Stream => "Resubscribe to the stream once the underlying issue is fixed.",
            ErrorCategory::Configuration => "Check the APPSTATE_* environment variables.",
            ErrorCategory::User => "Run with --help to see the accepted input.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
