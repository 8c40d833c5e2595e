use std::sync::Arc;

use echo_reply::EnvConfig;
use history_store::{FileKeyValueStore, HistoryStore, KeyValueStore, MemoryKeyValueStore};
use tracing::info;

/// Persistence backend for `config`: files under the history directory when
/// one is set, process memory otherwise.
pub fn history_backend(config: &EnvConfig) -> Arc<dyn KeyValueStore> {
    match config.history_dir.as_ref() {
        Some(dir) => {
            info!(dir = %dir.display(), "persisting reply history to disk");
            Arc::new(FileKeyValueStore::new(dir))
        }
        None => {
            info!("history directory not set; reply history lasts for this session only");
            Arc::new(MemoryKeyValueStore::new())
        }
    }
}

/// Opens the history store named by `config`, loading any persisted entries.
pub fn open_history(config: &EnvConfig) -> HistoryStore {
    HistoryStore::open(history_backend(config), config.history_key.clone())
}
