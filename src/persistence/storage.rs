//! Durable key-value storage
//!
//! Each key lives in its own file under `<data dir>/storage/`, written
//! atomically. Values are plain strings; callers own their encoding.

use super::files::{atomic_write, ensure_dir, read_file, storage_dir};
use anyhow::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Task list, as a JSON array
pub const TASKS_KEY: &str = "focus-flow-tasks";
/// Notification flag, "true" / "false"
pub const NOTIFICATIONS_KEY: &str = "focusflow-notifications";
/// Sound flag, "true" / "false"
pub const SOUND_KEY: &str = "focusflow-sound";
/// Focus duration in minutes
pub const FOCUS_DURATION_KEY: &str = "focusflow-focus-duration";
/// Break duration in minutes
pub const BREAK_DURATION_KEY: &str = "focusflow-break-duration";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Storage handle shared by the task and settings stores
pub type SharedStorage = Rc<dyn KeyValueStore>;

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// File-backed storage, one file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) the storage directory inside a data directory
    pub fn open(data_dir: &Path) -> Result<Self> {
        let dir = storage_dir(data_dir);
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            anyhow::bail!("Invalid storage key: {:?}", key);
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        read_file(self.path_for(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.path_for(key)?, value)
            .with_context(|| format!("Failed to store key {}", key))
    }
}

/// In-memory storage; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        assert!(storage.get(TASKS_KEY).unwrap().is_none());

        storage.set(TASKS_KEY, "[]").unwrap();
        assert_eq!(storage.get(TASKS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(temp_dir.path().join("storage").join(TASKS_KEY).exists());

        storage.set(TASKS_KEY, "[{}]").unwrap();
        assert_eq!(storage.get(TASKS_KEY).unwrap().as_deref(), Some("[{}]"));
    }

    #[test]
    fn test_file_storage_keys_are_independent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        storage.set(SOUND_KEY, "false").unwrap();
        storage.set(NOTIFICATIONS_KEY, "true").unwrap();

        assert_eq!(storage.get(SOUND_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(storage.get(NOTIFICATIONS_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();
        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.get("").is_err());
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set(FOCUS_DURATION_KEY, "30").unwrap();
        assert_eq!(other.get(FOCUS_DURATION_KEY).unwrap().as_deref(), Some("30"));
    }
}
