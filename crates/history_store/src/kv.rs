//! Key-value persistence port and the two backends shipped with the crate.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::error::HistoryStoreError;
use crate::paths::key_file_name;

/// Byte store addressed by string keys.
pub trait KeyValueStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HistoryStoreError>;

    /// Replaces the value under `key` as a whole.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), HistoryStoreError>;
}

/// One JSON file per key inside a root directory.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key_file_name(key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HistoryStoreError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(HistoryStoreError::io("reading history file", path, source)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), HistoryStoreError> {
        fs::create_dir_all(&self.root).map_err(|source| {
            HistoryStoreError::io("creating history directory", &self.root, source)
        })?;

        let path = self.path_for(key);
        let temp_path = path.with_extension(format!("json.tmp-{}", Uuid::new_v4().simple()));

        fs::write(&temp_path, value).map_err(|source| {
            HistoryStoreError::io("writing temporary history file", &temp_path, source)
        })?;

        if let Err(source) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(HistoryStoreError::io("replacing history file", path, source));
        }

        Ok(())
    }
}

/// Process-local store, used in tests and when no history directory is set.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `value` under `key`.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        lock_unpoisoned(&store.values).insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HistoryStoreError> {
        Ok(lock_unpoisoned(&self.values).get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), HistoryStoreError> {
        lock_unpoisoned(&self.values).insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
