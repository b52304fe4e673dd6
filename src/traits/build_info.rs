//! Build metadata abstraction.

/// Source of the running application's version identifier.
pub trait BuildInfo: Send + Sync {
    /// The version string, if the build carries one.
    fn version(&self) -> Option<String>;
}

/// The current version with absent or blank values normalized to `""`.
pub fn current_version(info: &dyn BuildInfo) -> String {
    info.version()
        .map(|version| version.trim().to_string())
        .unwrap_or_default()
}
