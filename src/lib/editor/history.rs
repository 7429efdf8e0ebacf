//! Module implementing the undo/redo history of edits.

use crate::model::{Config, ConfigPatch, TemplateId};


/// Current config of the editor together with a linear undo/redo log.
///
/// Every change pushes a full snapshot of the config.
/// Making a change after undoing discards the undone entries.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Config>,
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        History::with_config(Config::default())
    }
}

impl History {
    #[inline]
    pub fn new() -> Self {
        History::default()
    }

    /// Start the history from given config, e.g. one decoded from a share link.
    pub fn with_config(config: Config) -> Self {
        History{entries: vec![config], cursor: 0}
    }
}

// Accessors.
impl History {
    /// The current config.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.entries[self.cursor]
    }

    /// Number of entries in the history.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Index of the current entry.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

// Modifications.
impl History {
    /// Change some fields of the current config.
    pub fn update_config(&mut self, patch: ConfigPatch) {
        let config = self.config().merged(patch);
        self.push(config);
    }

    /// Replace the current config entirely.
    pub fn set_config(&mut self, config: Config) {
        self.push(config);
    }

    /// Switch to given template along with all its style defaults,
    /// as a single history entry.
    pub fn apply_template(&mut self, id: TemplateId) {
        let mut config = self.config().clone();
        config.set_template(id);
        self.push(config);
    }

    /// Go back to the default config, forgetting the whole history.
    pub fn reset_config(&mut self) {
        debug!("Resetting editor history of {} entries", self.entries.len());
        self.entries = vec![Config::default()];
        self.cursor = 0;
    }

    /// Step back in history. Returns whether there was anything to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        trace!("Undo, now at entry {}/{}", self.cursor + 1, self.entries.len());
        true
    }

    /// Step forward in history. Returns whether there was anything to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        trace!("Redo, now at entry {}/{}", self.cursor + 1, self.entries.len());
        true
    }

    fn push(&mut self, config: Config) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(config);
        self.cursor = self.entries.len() - 1;
        trace!("History now has {} entries", self.entries.len());
    }
}
