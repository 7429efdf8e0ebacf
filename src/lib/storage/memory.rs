//! Module implementing the in-memory config store.

use crate::model::{Config, Preferences};
use super::{push_recent, remove_id, stamped, ConfigStore, StorageResult};


/// Store which keeps the configs in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    recent: Vec<Config>,
    last: Option<Config>,
    preferences: Preferences,
}

impl MemoryStore {
    #[inline]
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl ConfigStore for MemoryStore {
    fn save(&mut self, config: &Config) -> StorageResult<Config> {
        let saved = stamped(config);
        push_recent(&mut self.recent, saved.clone());
        self.last = Some(saved.clone());
        Ok(saved)
    }

    fn list_recent(&self) -> StorageResult<Vec<Config>> {
        Ok(self.recent.clone())
    }

    fn last(&self) -> StorageResult<Option<Config>> {
        Ok(self.last.clone())
    }

    fn delete(&mut self, id: &str) -> StorageResult<bool> {
        Ok(remove_id(&mut self.recent, &mut self.last, id))
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        self.recent.clear();
        self.last = None;
        Ok(())
    }

    fn save_preferences(&mut self, preferences: &Preferences) -> StorageResult<()> {
        self.preferences = preferences.clone();
        Ok(())
    }

    fn preferences(&self) -> StorageResult<Preferences> {
        Ok(self.preferences.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::MemoryStore;

    #[test]
    fn store() {
        super::super::tests::exercise(&mut MemoryStore::new());
    }
}
