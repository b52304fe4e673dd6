//! Configuration for the pipeline and the demo binary.
//!
//! Values come from defaults, then `APPSTATE_*` environment variables, then
//! explicit `with_*` overrides (the CLI flags).
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `APPSTATE_KEY_PREFIX` | namespace of the persisted keys | `RxAppState` |
//! | `APPSTATE_STORE_PATH` | JSON store file | `~/.appstate/store.json` |
//! | `APPSTATE_APP_VERSION` | overrides the build version | none |
//! | `APPSTATE_LOG` | tracing filter directive | `info` |

use std::path::PathBuf;

use crate::adapters::JsonFileStore;
use crate::error::ConfigError;

/// Default namespace of the persisted keys.
pub const DEFAULT_KEY_PREFIX: &str = "RxAppState";

/// Names of the persisted keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Flag behind `is_first_launch`.
    pub is_first_launch: String,
    /// Flag behind `first_launch_only`.
    pub first_launch_only: String,
    /// Counter behind `open_count`.
    pub open_count: String,
    /// Last recorded application version.
    pub last_app_version: String,
}

impl StorageKeys {
    /// Keys namespaced as `<prefix>_<name>`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            is_first_launch: format!("{prefix}_isFirstLaunch"),
            first_launch_only: format!("{prefix}_firstLaunchOnly"),
            open_count: format!("{prefix}_numDidOpenApp"),
            last_app_version: format!("{prefix}_lastAppVersion"),
        }
    }

    pub fn all(&self) -> [&str; 4] {
        [
            self.is_first_launch.as_str(),
            self.first_launch_only.as_str(),
            self.open_count.as_str(),
            self.last_app_version.as_str(),
        ]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Runtime configuration.
///
/// # Example
///
/// ```
/// use appstate::config::Config;
///
/// let config = Config::default()
///     .with_key_prefix("MyApp")
///     .with_app_version_override("2.0");
/// assert_eq!(config.storage_keys().open_count, "MyApp_numDidOpenApp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub key_prefix: String,
    /// Explicit store path; `None` means `~/.appstate/store.json`.
    pub store_path: Option<PathBuf>,
    /// Replaces the build version, for exercising upgrades by hand.
    pub app_version_override: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            store_path: None,
            app_version_override: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    pub fn with_app_version_override(mut self, version: impl Into<String>) -> Self {
        self.app_version_override = Some(version.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(prefix) = get("APPSTATE_KEY_PREFIX") {
            config.key_prefix = prefix;
        }
        if let Some(path) = get("APPSTATE_STORE_PATH") {
            config.store_path = Some(PathBuf::from(path));
        }
        if let Some(version) = get("APPSTATE_APP_VERSION") {
            config.app_version_override = Some(version);
        }
        if let Some(level) = get("APPSTATE_LOG") {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values that can be wrong.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "key_prefix",
                message: "must not be empty".to_string(),
            });
        }
        if self.key_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                name: "key_prefix",
                message: format!("must not contain whitespace: {:?}", self.key_prefix),
            });
        }
        Ok(())
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(&self.key_prefix)
    }

    /// The configured store path, or the default under the home directory.
    pub fn resolved_store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => JsonFileStore::default_path(),
        }
    }
}
