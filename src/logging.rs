//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Log output goes to stderr so the demo's stdout only carries the derived
//! signals.
//!
//! # Log Levels
//!
//! - `warn`: a store failure terminated a derived stream
//! - `info`: first launch, new app version, reset
//! - `debug`: every notification, open pulse and counter write

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::error::ConfigError;

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `appstate::signals=debug`.
    pub filter: String,
    pub with_ansi: bool,
    /// Whether to include the module path in each line.
    pub with_target: bool,
    pub with_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_ansi: true,
            with_target: false,
            with_timestamps: false,
        }
    }
}

impl LogConfig {
    /// Logging settings for the given runtime configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            filter: config.log_level.clone(),
            ..Default::default()
        }
    }

    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.with_ansi = enabled;
        self
    }
}

/// Parse the filter directive.
pub fn build_env_filter(directive: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(directive)
        .map_err(|e| ConfigError::Logging(format!("invalid filter {directive:?}: {e}")))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), ConfigError> {
    let filter = build_env_filter(&config.filter)?;
    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target);

    let result = if config.with_timestamps {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.without_time())
            .try_init()
    };
    result.map_err(|e| ConfigError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_takes_level() {
        let config = Config::default().with_log_level("appstate=debug");
        let log = LogConfig::from_config(&config);
        assert_eq!(log.filter, "appstate=debug");
        assert!(log.with_ansi);
    }

    #[test]
    fn test_valid_directives_parse() {
        assert!(build_env_filter("info").is_ok());
        assert!(build_env_filter("appstate::signals=trace,warn").is_ok());
    }

    #[test]
    fn test_invalid_directive_is_config_error() {
        let err = build_env_filter("appstate=loud").unwrap_err();
        assert!(matches!(err, ConfigError::Logging(_)));
    }
}
