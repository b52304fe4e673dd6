//! appstate - application and view lifecycle transitions as observable
//! streams, with derived open, open-count, first-launch and upgrade
//! signals backed by a durable key-value store.
//!
//! This library exposes modules for use in integration tests and by host
//! glue code. [`app::AppLifecycle`] is the usual entry point.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod observable;
pub mod signals;
pub mod state;
pub mod traits;

pub use app::AppLifecycle;
pub use error::{AppStateError, AppStateResult};
pub use events::{AppNotification, LifecycleEventSource, ViewNotification};
pub use state::{AppState, ViewLifecycle, ViewState};
