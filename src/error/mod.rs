//! Error handling for the lifecycle pipeline.
//!
//! - **Domain errors**: [`StoreError`], [`StreamError`], [`ConfigError`], [`CliError`]
//! - **Unified error**: [`AppStateError`] with [`ErrorCategory`] classification
//! - **Result alias**: [`AppStateResult<T>`]
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Storage | Durable store read/write failed | Yes |
//! | Stream | Derived stream terminated with an error | No |
//! | Configuration | Invalid environment or missing home dir | No |
//! | User | Bad CLI flag or demo input | No |

mod appstate_error;
mod category;
mod cli;
mod config;
mod result;
mod store;
mod stream;

pub use appstate_error::AppStateError;
pub use category::ErrorCategory;
pub use cli::CliError;
pub use config::ConfigError;
pub use result::AppStateResult;
pub use store::StoreError;
pub use stream::StreamError;
