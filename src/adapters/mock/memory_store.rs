//! In-memory key-value store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StoreError;
use crate::observable::lock;
use crate::traits::{KeyValueStore, StoredValue};

/// In-memory store for testing.
///
/// Clones share the same contents, so a test can keep a handle while the
/// pipeline owns another. Reads and writes can be made to fail, and every
/// successful write is counted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, StoredValue>>>,
    read_should_fail: Arc<AtomicBool>,
    write_should_fail: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial contents.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, StoredValue)>,
        K: Into<String>,
    {
        let store = Self::new();
        lock(&store.values).extend(values.into_iter().map(|(k, v)| (k.into(), v)));
        store
    }

    /// Configure whether getters should fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        self.read_should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Configure whether setters and `remove` should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        self.write_should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value under `key`.
    pub fn value(&self, key: &str) -> Option<StoredValue> {
        lock(&self.values).get(key).cloned()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.values).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.values).is_empty()
    }

    fn read(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        if self.read_should_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Mock read failure".to_string()));
        }
        Ok(lock(&self.values).get(key).cloned())
    }

    fn write(&self, key: &str, value: Option<StoredValue>) -> Result<(), StoreError> {
        if self.write_should_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("Mock write failure".to_string()));
        }
        let mut values = lock(&self.values);
        match value {
            Some(value) => {
                values.insert(key.to_string(), value);
            }
            None => {
                values.remove(key);
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        StoredValue::read_string(key, self.read(key)?.as_ref())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write(key, Some(StoredValue::String(value.to_string())))
    }

    fn get_int(&self, key: &str) -> Result<i64, StoreError> {
        StoredValue::read_int(key, self.read(key)?.as_ref())
    }

    fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.write(key, Some(StoredValue::Int(value)))
    }

    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        StoredValue::read_bool(key, self.read(key)?.as_ref())
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.write(key, Some(StoredValue::Bool(value)))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.write(key, None)
    }
}
