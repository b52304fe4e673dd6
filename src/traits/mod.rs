//! Trait abstractions for the pipeline's collaborators.
//!
//! The lifecycle pipeline never reaches for global state: the host that
//! delivers notifications, the durable store and the build metadata are all
//! injected through these traits, so tests can substitute the doubles in
//! [`crate::adapters::mock`].
//!
//! # Traits
//!
//! - [`ApplicationDelegate`] - app lifecycle hooks driven by the host
//! - [`ViewLifecycleDelegate`] - view visibility hooks driven by the host
//! - [`KeyValueStore`] - durable string/int/bool storage
//! - [`BuildInfo`] - the current application version

pub mod build_info;
pub mod delegate;
pub mod store;

pub use build_info::{current_version, BuildInfo};
pub use delegate::{ApplicationDelegate, ViewLifecycleDelegate};
pub use store::{KeyValueStore, StoredValue};
