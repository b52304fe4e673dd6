//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`JsonFileStore`] - key-value store persisted as a JSON document
//! - [`StaticBuildInfo`] - build version fixed at construction
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::InMemoryStore`] - in-memory store with failure injection
//! - [`mock::MockBuildInfo`] - build version that can change mid-test
//! - [`mock::RecordingDelegate`] - records every lifecycle hook it receives
//! - [`mock::ScriptedHost`] - replays a notification script into a delegate

pub mod build_info;
pub mod file_store;
pub mod mock;

pub use build_info::StaticBuildInfo;
pub use file_store::JsonFileStore;
pub use mock::{InMemoryStore, MockBuildInfo, RecordingDelegate, ScriptedHost};
