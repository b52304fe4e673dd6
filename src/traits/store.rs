//! Durable key-value storage abstraction.
//!
//! The contract mirrors a platform user-defaults store: typed getters return
//! a neutral value for missing keys (`None`, `0`, `false`), and every setter
//! is durable once it returns `Ok`.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Trait for durable string/int/bool storage.
///
/// Implementations must be safe to call from any thread; the pipeline
/// serializes its own read-modify-write sequences.
///
/// # Example
///
/// ```
/// use appstate::adapters::mock::InMemoryStore;
/// use appstate::traits::KeyValueStore;
///
/// let store = InMemoryStore::new();
/// assert_eq!(store.get_int("opens").unwrap(), 0);
/// store.set_int("opens", 3).unwrap();
/// assert_eq!(store.get_int("opens").unwrap(), 3);
/// ```
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Missing keys read as `0`.
    fn get_int(&self, key: &str) -> Result<i64, StoreError>;

    fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError>;

    /// Missing keys read as `false`.
    fn get_bool(&self, key: &str) -> Result<bool, StoreError>;

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError>;

    /// Delete a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// A value as kept by the bundled store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl StoredValue {
    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            StoredValue::Bool(_) => "bool",
            StoredValue::Int(_) => "int",
            StoredValue::String(_) => "string",
        }
    }

    /// Read an optional stored value as a string.
    pub fn read_string(key: &str, value: Option<&StoredValue>) -> Result<Option<String>, StoreError> {
        match value {
            None => Ok(None),
            Some(StoredValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(key, "string", other)),
        }
    }

    /// Read an optional stored value as an int, defaulting to `0`.
    pub fn read_int(key: &str, value: Option<&StoredValue>) -> Result<i64, StoreError> {
        match value {
            None => Ok(0),
            Some(StoredValue::Int(n)) => Ok(*n),
            Some(other) => Err(mismatch(key, "int", other)),
        }
    }

    /// Read an optional stored value as a bool, defaulting to `false`.
    pub fn read_bool(key: &str, value: Option<&StoredValue>) -> Result<bool, StoreError> {
        match value {
            None => Ok(false),
            Some(StoredValue::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(key, "bool", other)),
        }
    }
}

fn mismatch(key: &str, expected: &'static str, found: &StoredValue) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}
