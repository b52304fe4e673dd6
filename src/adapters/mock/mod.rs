//! Mock implementations for testing.
//!
//! These doubles let the pipeline run without a file system or a real
//! host.
//!
//! # Available Mocks
//!
//! - [`InMemoryStore`] - in-memory store with failure injection
//! - [`MockBuildInfo`] - build version that can change mid-test
//! - [`RecordingDelegate`] - records every lifecycle hook it receives
//! - [`ScriptedHost`] - replays a notification script into a delegate

pub mod build_info;
pub mod delegate;
pub mod host;
pub mod memory_store;

pub use build_info::MockBuildInfo;
pub use delegate::RecordingDelegate;
pub use host::{HostEvent, ScriptedHost};
pub use memory_store::InMemoryStore;
