//! Session persistence: command history and user preferences.
//!
//! The [`SessionStore`] keeps an authoritative in-memory copy of both records
//! and mirrors them into a [`KvStore`] on every write. Storage faults are
//! logged at warn level and otherwise swallowed: a broken backend degrades
//! the shell to ephemeral history/preferences, it never breaks it.

mod store;

pub use store::{FileStore, KvStore, MemoryStore};

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::error::StorageError;
use crate::models::{Preferences, PreferencesPatch};
use crate::utils::HistoryBuffer;

/// Storage key for the preferences record.
pub const PREFERENCES_KEY: &str = "preferences";
/// Storage key for the history list.
pub const HISTORY_KEY: &str = "history";
/// Storage key for the last-accessed timestamp.
pub const LAST_ACCESSED_KEY: &str = "last-accessed";

/// Read and decode one JSON record. Backend faults pass through; a
/// malformed payload becomes [`StorageError::Decode`].
fn read_json<T: serde::de::DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|err| StorageError::Decode {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        None => Ok(None),
    }
}

pub struct SessionStore {
    store: Box<dyn KvStore>,
    preferences: Preferences,
    history: HistoryBuffer,
}

impl SessionStore {
    /// Load session state from a backend, falling back to defaults for
    /// anything missing or unreadable.
    pub fn new(store: Box<dyn KvStore>) -> Self {
        let preferences = Self::load_preferences(store.as_ref());
        let history = Self::load_history(store.as_ref(), preferences.history_size);
        Self {
            store,
            preferences,
            history,
        }
    }

    /// Purely ephemeral session, used as the degraded mode and in tests.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn load_preferences(store: &dyn KvStore) -> Preferences {
        match read_json(store, PREFERENCES_KEY) {
            Ok(Some(preferences)) => preferences,
            Ok(None) => Preferences::default(),
            Err(err) => {
                log::warn!("cannot load preferences, using defaults: {err}");
                Preferences::default()
            }
        }
    }

    fn load_history(store: &dyn KvStore, capacity: usize) -> HistoryBuffer {
        let entries: Vec<String> = match read_json(store, HISTORY_KEY) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("cannot load history, starting empty: {err}");
                Vec::new()
            }
        };
        // A tampered preferences file could carry a zero size; the buffer
        // itself requires a positive capacity.
        HistoryBuffer::from_entries(capacity.max(1), entries)
    }

    /// Whether the durable backend currently works. Never fails.
    pub fn is_storage_available(&self) -> bool {
        self.store.is_available()
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Merge a partial update over the current record and persist.
    pub fn save_preferences(&mut self, patch: PreferencesPatch) {
        self.preferences.apply(patch);
        self.history.set_capacity(self.preferences.history_size);
        self.persist_preferences();
        self.persist_history();
    }

    pub fn reset_preferences(&mut self) {
        self.preferences = Preferences::default();
        self.history.set_capacity(self.preferences.history_size);
        self.persist_preferences();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn history(&self) -> Vec<String> {
        self.history.to_vec()
    }

    /// Replace the whole history list, truncating to the cap first.
    pub fn save_history(&mut self, entries: Vec<String>) {
        self.history = HistoryBuffer::from_entries(self.preferences.history_size, entries);
        self.persist_history();
    }

    /// Append one executed command line. Blank input and immediate repeats
    /// are no-ops.
    pub fn add_command(&mut self, raw: &str) {
        if self.history.push(raw) {
            self.persist_history();
        }
        self.touch();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist_history();
    }

    // ------------------------------------------------------------------
    // Timestamps
    // ------------------------------------------------------------------

    /// Unix timestamp of the last recorded activity, if any.
    pub fn last_accessed(&self) -> Option<u64> {
        match self.store.get(LAST_ACCESSED_KEY) {
            Ok(Some(raw)) => raw.parse().ok(),
            _ => None,
        }
    }

    fn touch(&mut self) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if let Err(err) = self.store.set(LAST_ACCESSED_KEY, &now.to_string()) {
            log::warn!("cannot persist last-accessed timestamp: {err}");
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn persist_preferences(&mut self) {
        match serde_json::to_string(&self.preferences) {
            Ok(json) => {
                if let Err(err) = self.store.set(PREFERENCES_KEY, &json) {
                    log::warn!("cannot persist preferences, keeping in-memory copy: {err}");
                }
            }
            Err(err) => log::warn!("cannot encode preferences: {err}"),
        }
    }

    fn persist_history(&mut self) {
        match serde_json::to_string(&self.history.to_vec()) {
            Ok(json) => {
                if let Err(err) = self.store.set(HISTORY_KEY, &json) {
                    log::warn!("cannot persist history, keeping in-memory copy: {err}");
                }
            }
            Err(err) => log::warn!("cannot encode history: {err}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
