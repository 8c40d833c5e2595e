mod error;
mod kv;
mod paths;
mod schema;
mod store;

pub use error::HistoryStoreError;
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use paths::key_file_name;
pub use schema::{new_entry_id, HistoryEntry, RequestSnapshot};
pub use store::{HistoryStore, DEFAULT_HISTORY_KEY};
