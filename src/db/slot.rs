// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value slots.
//!
//! Two backends:
//! - [`FileKeyValueStore`]: one `<key>.json` file per slot in a directory
//! - [`MemoryKeyValueStore`]: process-local, for tests and ephemeral runs

use crate::db::StorageError;
use dashmap::DashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Named text slots. Writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `None` if it has never been written (or was removed).
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing an absent slot is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Directory-backed slots.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Open (and create if needed) the storage directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        tracing::info!(path = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        // Rename is atomic on the same filesystem: readers see old or new, never half.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory slots.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("workouts").unwrap(), None);

        store.set("workouts", "[1]").unwrap();
        store.set("workouts", "[2]").unwrap();
        assert_eq!(store.get("workouts").unwrap().as_deref(), Some("[2]"));

        store.remove("workouts").unwrap();
        assert_eq!(store.get("workouts").unwrap(), None);
        store.remove("workouts").unwrap();
    }

    #[test]
    fn test_memory_store_semantics() {
        exercise(&MemoryKeyValueStore::new());
    }

    #[test]
    fn test_file_store_semantics() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileKeyValueStore::open(dir.path()).unwrap());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileKeyValueStore::open(dir.path())
            .unwrap()
            .set("workouts", "[]")
            .unwrap();

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("workouts").unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("workouts.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }
}
