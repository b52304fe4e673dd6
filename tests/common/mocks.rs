//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from
//! `appstate::adapters::mock` and adds a store preloaded with prior state.

pub use appstate::adapters::mock::{InMemoryStore, MockBuildInfo, RecordingDelegate, ScriptedHost};
pub use appstate::traits::{KeyValueStore, StoredValue};

use std::sync::Arc;

use appstate::config::StorageKeys;

/// A store as left behind by a previous launch of `version` that was
/// opened `opens` times.
#[allow(dead_code)]
pub fn store_after_launch(version: &str, opens: i64) -> Arc<InMemoryStore> {
    let keys = StorageKeys::default();
    Arc::new(InMemoryStore::with_values([
        (keys.is_first_launch, StoredValue::Bool(true)),
        (keys.first_launch_only, StoredValue::Bool(true)),
        (keys.open_count, StoredValue::Int(opens)),
        (keys.last_app_version, StoredValue::String(version.to_string())),
    ]))
}
