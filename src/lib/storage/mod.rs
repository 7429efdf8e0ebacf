//! Module for persisting recently used stamp configs.

mod file;
mod memory;


pub use self::file::{FileStore, STORE_FILE_NAME};
pub use self::memory::MemoryStore;


use std::io;
use std::path::PathBuf;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::{Config, Preferences};


/// Maximum number of recent configs that are kept.
pub const MAX_RECENT_CONFIGS: usize = 20;

/// Version of the stored data format.
pub const STORAGE_VERSION: u32 = 1;


/// Result of a storage operation.
pub type StorageResult<T> = Result<T, StorageError>;

/// Store of recently used configs.
pub trait ConfigStore {
    /// Save the config as the most recent one.
    ///
    /// Returns the saved copy, with a fresh `id` and timestamps.
    fn save(&mut self, config: &Config) -> StorageResult<Config>;

    /// Recently saved configs, most recent first.
    fn list_recent(&self) -> StorageResult<Vec<Config>>;

    /// The config that was saved last, if any.
    fn last(&self) -> StorageResult<Option<Config>>;

    /// Remove the config with given id.
    /// Returns whether it was found.
    fn delete(&mut self, id: &str) -> StorageResult<bool>;

    /// Forget all saved configs.
    /// Preferences are kept.
    fn clear_all(&mut self) -> StorageResult<()>;

    /// Save the user's preferences, replacing the previous ones.
    fn save_preferences(&mut self, preferences: &Preferences) -> StorageResult<()>;

    /// The user's preferences. Empty if none have been saved.
    fn preferences(&self) -> StorageResult<Preferences>;
}


/// Error that may occur while accessing a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store's file couldn't be read or written.
    #[error("cannot access {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
    /// The configs couldn't be serialized.
    #[error("cannot serialize configs: {0}")]
    Serialize(#[from] serde_json::Error),
}


/// Copy of the config as it gets stored: with a new id and current timestamps.
fn stamped(config: &Config) -> Config {
    let now = OffsetDateTime::now_utc();
    Config{
        id: Some(Uuid::new_v4().to_string()),
        created_at: Some(now),
        updated_at: Some(now),
        ..config.clone()
    }
}

/// Put a freshly saved config at the front of the recent list.
fn push_recent(recent: &mut Vec<Config>, config: Config) {
    recent.insert(0, config);
    recent.truncate(MAX_RECENT_CONFIGS);
}

/// Remove config with given id from the recent list and last config.
fn remove_id(recent: &mut Vec<Config>, last: &mut Option<Config>, id: &str) -> bool {
    let before = recent.len();
    recent.retain(|c| c.id.as_ref().map(|i| i.as_str()) != Some(id));
    let was_last = last.as_ref().and_then(|c| c.id.as_ref()).map(|i| i == id).unwrap_or(false);
    if was_last {
        *last = None;
    }
    recent.len() != before || was_last
}
