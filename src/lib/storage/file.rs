//! Module implementing the config store backed by a JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::model::{Config, Preferences};
use super::{push_recent, remove_id, stamped, ConfigStore, StorageError, StorageResult,
            STORAGE_VERSION};


/// Name of the file inside the store's directory.
pub const STORE_FILE_NAME: &'static str = "recent.json";


/// Content of the store file.
#[derive(Debug, Serialize)]
struct Document {
    version: u32,
    recent: Vec<Config>,
    last: Option<Config>,
    #[serde(skip_serializing_if = "Preferences::is_empty")]
    preferences: Preferences,
}

impl Default for Document {
    fn default() -> Self {
        Document{version: STORAGE_VERSION, recent: vec![],
                 last: None, preferences: Preferences::default()}
    }
}

impl Document {
    /// Salvage whatever is readable from the JSON content of a store file.
    ///
    /// Recent configs are read one by one, so a single broken entry
    /// doesn't take the others with it.
    fn from_value(mut value: Value, path: &Path) -> Self {
        let mut doc = Document::default();

        match value.get("version").and_then(Value::as_u64) {
            Some(v) if v == STORAGE_VERSION as u64 => {}
            v => warn!("Store file {} has version {:?}, expected {}",
                path.display(), v, STORAGE_VERSION),
        }

        match value.get_mut("recent").map(Value::take) {
            Some(Value::Array(entries)) => {
                let count = entries.len();
                doc.recent = entries.into_iter()
                    .filter_map(|e| parse_field::<Config>(e, "recent config", path))
                    .collect();
                if doc.recent.len() < count {
                    warn!("Skipped {} unreadable recent config(s) in {}",
                        count - doc.recent.len(), path.display());
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => warn!("Recent configs in {} are not a list, ignoring", path.display()),
        }

        doc.last = match value.get_mut("last").map(Value::take) {
            Some(Value::Null) | None => None,
            Some(v) => parse_field(v, "last config", path),
        };
        doc.preferences = match value.get_mut("preferences").map(Value::take) {
            Some(Value::Null) | None => Preferences::default(),
            Some(v) => parse_field(v, "preferences", path).unwrap_or_default(),
        };
        doc
    }
}

fn parse_field<T: DeserializeOwned>(value: Value, what: &str, path: &Path) -> Option<T> {
    serde_json::from_value(value).map_err(|e| {
        warn!("Ignoring unreadable {} in {}: {}", what, path.display(), e);
    }).ok()
}


/// Store which keeps the configs in a JSON file inside given directory.
///
/// A missing or unreadable file is treated as an empty store.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[inline]
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FileStore{path: directory.as_ref().join(STORE_FILE_NAME)}
    }

    /// Path to the store file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileStore {
    fn read(&self) -> StorageResult<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                trace!("No store file at {}", self.path.display());
                return Ok(Document::default());
            }
            Err(e) => return Err(StorageError::Io{path: self.path.clone(), source: e}),
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ Value::Object(_)) => Ok(Document::from_value(value, &self.path)),
            Ok(_) => {
                warn!("Ignoring store file {} without a JSON object", self.path.display());
                Ok(Document::default())
            }
            Err(e) => {
                warn!("Ignoring corrupted store file {}: {}", self.path.display(), e);
                Ok(Document::default())
            }
        }
    }

    fn write(&self, doc: &Document) -> StorageResult<()> {
        let io_error = |e: io::Error| StorageError::Io{path: self.path.clone(), source: e};
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        let json = serde_json::to_vec_pretty(doc)?;
        fs::write(&self.path, json).map_err(io_error)?;
        debug!("Wrote {} recent config(s) to {}", doc.recent.len(), self.path.display());
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn save(&mut self, config: &Config) -> StorageResult<Config> {
        let mut doc = self.read()?;
        let saved = stamped(config);
        push_recent(&mut doc.recent, saved.clone());
        doc.last = Some(saved.clone());
        doc.version = STORAGE_VERSION;
        self.write(&doc)?;
        Ok(saved)
    }

    fn list_recent(&self) -> StorageResult<Vec<Config>> {
        Ok(self.read()?.recent)
    }

    fn last(&self) -> StorageResult<Option<Config>> {
        Ok(self.read()?.last)
    }

    fn delete(&mut self, id: &str) -> StorageResult<bool> {
        let mut doc = self.read()?;
        let found = remove_id(&mut doc.recent, &mut doc.last, id);
        if found {
            self.write(&doc)?;
        }
        Ok(found)
    }

    fn clear_all(&mut self) -> StorageResult<()> {
        let doc = self.read()?;
        if !doc.preferences.is_empty() {
            return self.write(&Document{preferences: doc.preferences, ..Document::default()});
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io{path: self.path.clone(), source: e}),
        }
    }

    fn save_preferences(&mut self, preferences: &Preferences) -> StorageResult<()> {
        let mut doc = self.read()?;
        doc.preferences = preferences.clone();
        doc.version = STORAGE_VERSION;
        self.write(&doc)
    }

    fn preferences(&self) -> StorageResult<Preferences> {
        Ok(self.read()?.preferences)
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use spectral::prelude::*;
    use tempfile::tempdir;
    use crate::model::{Config, Preferences, Theme};
    use crate::storage::ConfigStore;
    use super::FileStore;

    #[test]
    fn store() {
        let dir = tempdir().unwrap();
        super::super::tests::exercise(&mut FileStore::new(dir.path()));
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempdir().unwrap();
        let saved = FileStore::new(dir.path()).save(&Config::with_text("kept")).unwrap();

        let store = FileStore::new(dir.path());
        assert_that!(store.list_recent().unwrap()).is_equal_to(vec![saved.clone()]);
        assert_that!(store.last().unwrap()).is_equal_to(Some(saved));

        let json = fs::read_to_string(store.path()).unwrap();
        assert_that!(json.contains("\"version\": 1")).is_true();
        assert_that!(json.contains("\"createdAt\"")).is_true();
    }

    #[test]
    fn corrupted_file_reads_empty() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert_that!(store.list_recent().unwrap()).is_empty();
        assert_that!(store.last().unwrap()).is_none();

        // Saving replaces the corrupted content.
        store.save(&Config::default()).unwrap();
        assert_that!(store.list_recent().unwrap()).has_length(1);
    }

    #[test]
    fn broken_entries_are_skipped() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let good = store.save(&Config::with_text("good")).unwrap();

        let json = fs::read_to_string(store.path()).unwrap();
        let mut doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        doc["recent"].as_array_mut().unwrap()
            .insert(0, serde_json::json!({"text": "bad", "template": "nope"}));
        doc["preferences"] = serde_json::json!({"theme": "dark"});
        fs::write(store.path(), doc.to_string()).unwrap();

        assert_that!(store.list_recent().unwrap()).is_equal_to(vec![good.clone()]);
        assert_that!(store.last().unwrap()).is_equal_to(Some(good.clone()));
        assert_that!(store.preferences().unwrap().theme).is_equal_to(Some(Theme::Dark));

        // Saving keeps the readable entries.
        let newer = store.save(&Config::with_text("newer")).unwrap();
        assert_that!(store.list_recent().unwrap()).is_equal_to(vec![newer, good]);
    }

    #[test]
    fn preferences_survive_clearing() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        let prefs = Preferences{theme: Some(Theme::Light), ..Preferences::default()};
        store.save_preferences(&prefs).unwrap();
        store.save(&Config::default()).unwrap();

        store.clear_all().unwrap();
        let store = FileStore::new(dir.path());
        assert_that!(store.list_recent().unwrap()).is_empty();
        assert_that!(store.preferences().unwrap()).is_equal_to(prefs);
    }

    #[test]
    fn creates_directory() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("dir"));
        store.save(&Config::default()).unwrap();
        assert_that!(store.path().exists()).is_true();
    }
}
