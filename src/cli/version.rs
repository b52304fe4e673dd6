//! Version display for the demo binary.

/// The current version of appstate, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `appstate <version>`, as printed by `--version`.
pub fn version_string() -> String {
    format!("appstate {}", VERSION)
}
