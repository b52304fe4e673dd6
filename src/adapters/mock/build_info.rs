//! Mutable build version for testing upgrades.

use std::sync::{Arc, Mutex};

use crate::observable::lock;
use crate::traits::BuildInfo;

/// Build version that a test can change between launches.
#[derive(Debug, Clone, Default)]
pub struct MockBuildInfo {
    version: Arc<Mutex<Option<String>>>,
}

impl MockBuildInfo {
    pub fn new(version: impl Into<String>) -> Self {
        let info = Self::default();
        info.set_version(Some(version.into()));
        info
    }

    /// A build without version metadata.
    pub fn without_version() -> Self {
        Self::default()
    }

    pub fn set_version<S: Into<String>>(&self, version: Option<S>) {
        *lock(&self.version) = version.map(Into::into);
    }
}

impl BuildInfo for MockBuildInfo {
    fn version(&self) -> Option<String> {
        lock(&self.version).clone()
    }
}
