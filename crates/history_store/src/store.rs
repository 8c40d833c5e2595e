use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::HistoryStoreError;
use crate::kv::{KeyValueStore, MemoryKeyValueStore};
use crate::schema::HistoryEntry;

/// Key the history blob is stored under unless configured otherwise.
pub const DEFAULT_HISTORY_KEY: &str = "echoai_reply_history";

/// Newest-first list of generated replies, mirrored to one key of a
/// [`KeyValueStore`].
///
/// The backend is read once by [`HistoryStore::open`] and rewritten as a whole
/// on every mutation. Persistence is best-effort: failures are logged and the
/// in-memory list stays authoritative for the session.
pub struct HistoryStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    entries: Vec<HistoryEntry>,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl HistoryStore {
    pub fn open(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            entries: Vec::new(),
        };
        store.entries = store.load();
        store
    }

    /// Empty store backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryKeyValueStore::new()), DEFAULT_HISTORY_KEY)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Reads the persisted list. Absent, unreadable or non-list data yields an
    /// empty list.
    #[must_use]
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(error) => {
                warn!(key = %self.key, %error, "discarding unreadable reply history");
                Vec::new()
            }
        }
    }

    /// Strict variant of [`HistoryStore::load`] that reports why data was
    /// rejected. Non-object array elements are skipped, not reported.
    pub fn try_load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError> {
        let Some(bytes) = self.backend.get(&self.key)? else {
            return Ok(Vec::new());
        };

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|source| HistoryStoreError::decode(&self.key, source))?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(HistoryStoreError::NotAList {
                    key: self.key.clone(),
                    found: json_kind(&other),
                })
            }
        };

        let total = items.len();
        let entries: Vec<HistoryEntry> = items
            .iter()
            .filter(|item| item.is_object())
            .filter_map(|item| HistoryEntry::deserialize(item).ok())
            .collect();

        if entries.len() != total {
            debug!(
                key = %self.key,
                skipped = total - entries.len(),
                "skipped malformed history items"
            );
        }

        Ok(entries)
    }

    /// Writes `entries` as the full persisted list, swallowing failures.
    pub fn save(&self, entries: &[HistoryEntry]) {
        if let Err(error) = self.try_save(entries) {
            warn!(key = %self.key, %error, "failed to persist reply history");
        }
    }

    pub fn try_save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryStoreError> {
        let encoded = serde_json::to_vec(entries)
            .map_err(|source| HistoryStoreError::encode(&self.key, source))?;
        self.backend.set(&self.key, &encoded)
    }

    /// Prepends `entry` and persists.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.save(&self.entries);
    }

    /// Removes every entry with `id` and persists the remainder. Returns
    /// whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.save(&self.entries);
        self.entries.len() != before
    }

    /// Case-insensitive substring search over the original email, subject line
    /// and detected intent. A blank query matches every entry; otherwise the
    /// query is matched as typed, surrounding whitespace included.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        if query.trim().is_empty() {
            return self.entries.iter().collect();
        }

        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry_matches(entry, &needle))
            .collect()
    }
}

fn entry_matches(entry: &HistoryEntry, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&entry.request.original_email)
        || entry.response.subject_line.as_deref().is_some_and(contains)
        || entry.response.detected_intent.as_deref().is_some_and(contains)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
