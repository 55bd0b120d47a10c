//! Key-value persistence for session state
//!
//! A small string-keyed store with JSON values. The file-backed implementation
//! writes through a temp file and atomic rename, so a crash mid-write never
//! leaves a torn store on disk.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// Well-known store keys.
pub mod keys {
    pub const STATE: &str = "plansphere_state";
    pub const ITINERARY: &str = "plansphere_itinerary";
    pub const THEME: &str = "plansphere_theme";
    pub const EXPENSES: &str = "plansphere_expenses";
    pub const BUDGET: &str = "plansphere_budget";
    pub const PROFILE: &str = "plansphere_profile";
}

/// String-keyed JSON storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store holding all entries in one JSON document
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl FileStore {
    /// Open (or create) a store at the given path.
    ///
    /// A corrupt store file is logged and replaced with an empty store rather
    /// than failing the session.
    pub fn open(path: PathBuf) -> Result<Self> {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Open the store at the default platform data path
    pub fn open_default() -> Result<Self> {
        let path = default_path()
            .ok_or_else(|| Error::Store("no platform data directory available".into()))?;
        Self::open(path)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Store("store path has no parent directory".into()))?;
        fs::create_dir_all(parent)?;

        let tmp = tempfile::NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&tmp, &self.entries)?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Store(format!("failed to persist store: {}", e)))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Default store location under the platform data directory
pub fn default_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("plansphere").join("store.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        store.set(keys::THEME, json!("dark")).unwrap();
        assert_eq!(store.get(keys::THEME), Some(json!("dark")));
        store.remove(keys::THEME).unwrap();
        assert!(store.get(keys::THEME).is_none());
    }

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = FileStore::open(path.clone()).unwrap();
            store.set(keys::BUDGET, json!(1500.0)).unwrap();
        }

        let store = FileStore::open(path).unwrap();
        assert_eq!(store.get(keys::BUDGET), Some(json!(1500.0)));
    }

    #[test]
    fn test_file_store_survives_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(path).unwrap();
        assert!(store.get(keys::STATE).is_none());
    }

    #[test]
    fn test_file_store_remove_missing_key_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("store.json")).unwrap();
        store.remove("never_set").unwrap();
        // no file should have been created by the no-op
        assert!(!store.path().exists());
    }
}
