//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures for driving an [`AppLifecycle`]
//! against an in-memory store.
//!
//! # Example
//!
//! ```ignore
//! use common::{TestLifecycleBuilder, play_open_sequence};
//!
//! let harness = TestLifecycleBuilder::new().with_version("1.0").build();
//! play_open_sequence(&harness.lifecycle);
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use appstate::app::AppLifecycle;
use appstate::config::StorageKeys;
use appstate::events::AppNotification;
use appstate::traits::ApplicationDelegate;

/// The canonical seven-step sequence: active, inactive, active, background,
/// active, background, active. Three opens.
pub const OPEN_SEQUENCE: [AppNotification; 7] = [
    AppNotification::DidBecomeActive,
    AppNotification::WillResignActive,
    AppNotification::DidBecomeActive,
    AppNotification::DidEnterBackground,
    AppNotification::DidBecomeActive,
    AppNotification::DidEnterBackground,
    AppNotification::DidBecomeActive,
];

/// Deliver [`OPEN_SEQUENCE`] through the delegate interface.
pub fn play_open_sequence(delegate: &dyn ApplicationDelegate) {
    for notification in OPEN_SEQUENCE {
        notification.deliver_to(delegate);
    }
}

/// A lifecycle plus handles on its collaborators.
pub struct TestLifecycle {
    pub lifecycle: AppLifecycle,
    pub store: Arc<InMemoryStore>,
    pub build: Arc<MockBuildInfo>,
    pub keys: StorageKeys,
}

impl TestLifecycle {
    /// A second lifecycle over the same store and build, as after a
    /// process restart.
    pub fn relaunch(&self) -> AppLifecycle {
        AppLifecycle::with_keys(
            self.store.clone(),
            self.build.clone(),
            self.keys.clone(),
        )
    }
}

/// Builder for test lifecycles.
#[derive(Default)]
pub struct TestLifecycleBuilder {
    store: Option<Arc<InMemoryStore>>,
    version: Option<String>,
    prefix: Option<String>,
}

impl TestLifecycleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing store.
    pub fn with_store(mut self, store: Arc<InMemoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn build(self) -> TestLifecycle {
        let store = self.store.unwrap_or_else(|| Arc::new(InMemoryStore::new()));
        let build = Arc::new(match self.version {
            Some(version) => MockBuildInfo::new(version),
            None => MockBuildInfo::without_version(),
        });
        let keys = match self.prefix {
            Some(prefix) => StorageKeys::with_prefix(&prefix),
            None => StorageKeys::default(),
        };
        TestLifecycle {
            lifecycle: AppLifecycle::with_keys(store.clone(), build.clone(), keys.clone()),
            store,
            build,
            keys,
        }
    }
}

/// A lifecycle at version `1.0` over a fresh store.
#[allow(dead_code)]
pub fn test_lifecycle() -> TestLifecycle {
    TestLifecycleBuilder::new().with_version("1.0").build()
}
