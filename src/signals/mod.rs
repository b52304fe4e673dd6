//! Derived signals built on the app state stream.
//!
//! ```text
//! AppStateStream ──► OpenDetector ──┬─► open_count
//!                                   ├─► is_first_launch
//!                                   └─► is_first_launch_of_new_version
//! store (at subscribe time) ────────┬─► first_launch_only
//!                                   └─► first_launch_of_new_version_only
//! ```
//!
//! Side effects on the durable store happen inside the per-pulse mapping.
//! `open_count` performs one read-modify-write per pulse *per subscription*.
//! `is_first_launch`, `is_first_launch_of_new_version` and
//! `shared_open_count` evaluate once per pulse and hand the memoized result
//! to every subscription reacting to the same notification.

pub mod counter;
pub mod first_launch;
pub mod memo;
pub mod open;
pub mod version;

pub use counter::{increment_counter, next_count, open_count, shared_open_count};
pub use first_launch::{claim_flag, first_launch_only, is_first_launch};
pub use memo::PulseMemo;
pub use open::OpenDetector;
pub use version::{
    classify, first_launch_of_new_version_only, is_first_launch_of_new_version,
    record_current_version, VersionStatus,
};

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::config::StorageKeys;
use crate::error::{StoreError, StreamError};
use crate::observable::lock;
use crate::traits::KeyValueStore;

/// Store handle plus key names, shared by every derivation of one pipeline.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
    keys: Arc<StorageKeys>,
    write_lock: Arc<Mutex<()>>,
}

impl fmt::Debug for Persistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Persistence")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self {
            store,
            keys: Arc::new(keys),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Run a read-modify-write sequence with exclusive access to the store.
    pub fn critical_section<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&dyn KeyValueStore) -> R,
    {
        let _guard = lock(&self.write_lock);
        f(self.store.as_ref())
    }
}

/// Convert a store failure into the error delivered on `operation`'s stream.
pub(crate) fn surface(operation: &'static str) -> impl Fn(StoreError) -> StreamError {
    move |err| {
        tracing::warn!(operation, error = %err, "store access failed, terminating subscription");
        StreamError::storage(operation, err)
    }
}
