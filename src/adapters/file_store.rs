//! File-backed key-value store.
//!
//! All keys live in one JSON object, by default at
//! `~/.appstate/store.json`:
//!
//! ```json
//! {
//!   "RxAppState_isFirstLaunch": true,
//!   "RxAppState_numDidOpenApp": 3,
//!   "RxAppState_lastAppVersion": "1.4.0"
//! }
//! ```
//!
//! The document is loaded once on open and kept in memory. Every write
//! rewrites the whole file through a temporary sibling and a rename, so a
//! crash mid-write leaves the previous document in place.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ConfigError, StoreError};
use crate::observable::lock;
use crate::traits::{KeyValueStore, StoredValue};

/// The store directory name.
const STORE_DIR: &str = ".appstate";

/// The store file name.
const STORE_FILE: &str = "store.json";

/// Key-value store persisted as a JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, StoredValue>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store; the file and its parent directory
    /// are created on the first write. A file that exists but is not a JSON
    /// object of bools, integers and strings is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = Self::load(&path)?;
        tracing::debug!(path = %path.display(), keys = values.len(), "opened store");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// `~/.appstate/store.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(STORE_DIR).join(STORE_FILE))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.values).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.values).is_empty()
    }

    /// Remove every key and the backing file.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut values = lock(&self.values);
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| StoreError::io(&self.path, &e))?;
        }
        values.clear();
        Ok(())
    }

    fn load(path: &Path) -> Result<BTreeMap<String, StoredValue>, StoreError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let file = File::open(path).map_err(|e| StoreError::io(path, &e))?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    fn save(&self, values: &BTreeMap<String, StoredValue>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, &e))?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let file = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, &e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, values)?;
        writer.flush().map_err(|e| StoreError::io(&tmp_path, &e))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, &e))
    }

    /// Apply `change` to a copy of the document and persist it. The cached
    /// document is only replaced once the file write succeeded.
    fn update<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, StoredValue>),
    {
        let mut values = lock(&self.values);
        let mut next = values.clone();
        change(&mut next);
        if next == *values {
            return Ok(());
        }
        self.save(&next)?;
        *values = next;
        Ok(())
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.update(|values| {
            values.insert(key.to_string(), value);
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        StoredValue::read_string(key, lock(&self.values).get(key))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(key, StoredValue::String(value.to_string()))
    }

    fn get_int(&self, key: &str) -> Result<i64, StoreError> {
        StoredValue::read_int(key, lock(&self.values).get(key))
    }

    fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.set(key, StoredValue::Int(value))
    }

    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        StoredValue::read_bool(key, lock(&self.values).get(key))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(key, StoredValue::Bool(value))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> JsonFileStore {
        JsonFileStore::open(temp_dir.path().join(STORE_DIR).join(STORE_FILE)).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(store.is_empty());
        assert_eq!(store.get_string("k").unwrap(), None);
        assert_eq!(store.get_int("k").unwrap(), 0);
        assert!(!store.get_bool("k").unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store.set_int("opens", 1).unwrap();

        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = store_in(&temp_dir);
            store.set_bool("first", true).unwrap();
            store.set_int("opens", 42).unwrap();
            store.set_string("version", "1.4.0").unwrap();
        }

        let store = store_in(&temp_dir);
        assert!(store.get_bool("first").unwrap());
        assert_eq!(store.get_int("opens").unwrap(), 42);
        assert_eq!(store.get_string("version").unwrap().as_deref(), Some("1.4.0"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_document_shape() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.set_int("RxAppState_numDidOpenApp", 3).unwrap();
        store.set_bool("RxAppState_isFirstLaunch", true).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["RxAppState_numDidOpenApp"], 3);
        assert_eq!(json["RxAppState_isFirstLaunch"], true);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.set_string("opens", "three").unwrap();

        let err = store.get_int("opens").unwrap_err();
        assert_eq!(err.error_code(), "STORE_TYPE_MISMATCH");
    }

    #[test]
    fn test_remove_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        store.set_int("a", 1).unwrap();
        store.set_int("b", 2).unwrap();

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get_int("a").unwrap(), 0);
        assert_eq!(store.len(), 1);

        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_fails_to_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(STORE_FILE);
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_unwritable_location_keeps_cache_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = JsonFileStore::open(blocker.join(STORE_FILE)).unwrap();

        let err = store.set_int("opens", 1).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.get_int("opens").unwrap(), 0);
    }
}
