//! Build version sources.

use crate::traits::BuildInfo;

/// Version fixed at construction.
///
/// ```
/// use appstate::adapters::StaticBuildInfo;
/// use appstate::traits::BuildInfo;
///
/// assert_eq!(StaticBuildInfo::new("1.2").version().as_deref(), Some("1.2"));
/// assert_eq!(StaticBuildInfo::none().version(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBuildInfo {
    version: Option<String>,
}

impl StaticBuildInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
        }
    }

    /// A build without version metadata.
    pub fn none() -> Self {
        Self { version: None }
    }

    /// The crate's own version, unless `override_version` is given.
    pub fn from_package(override_version: Option<&str>) -> Self {
        match override_version {
            Some(version) => Self::new(version),
            None => Self::new(env!("CARGO_PKG_VERSION")),
        }
    }
}

impl BuildInfo for StaticBuildInfo {
    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}
