//! Result type alias for crate operations.

use super::appstate_error::AppStateError;

/// Type alias for Results using [`AppStateError`].
pub type AppStateResult<T> = Result<T, AppStateError>;
