//! Canonical lifecycle states and the streams that classify raw
//! notifications into them.
//!
//! - [`AppStateStream`]: process-wide, built on a
//!   [`LifecycleEventSource`](crate::events::LifecycleEventSource)
//! - [`ViewLifecycle`]: one per view instance, fully independent

pub mod app_state;
pub mod view_state;

pub use app_state::{AppState, AppStateStream};
pub use view_state::{ViewLifecycle, ViewState};
