//! Key-value backends for session persistence.
//!
//! The session layer talks to a [`KvStore`]: a flat string-to-string map
//! with an availability probe. Two backends ship with the crate: a JSON-file
//! store for real persistence and an in-memory store used as the degraded
//! fallback and in tests.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::core::error::StorageError;

/// A durable string key-value store.
///
/// Implementations must never panic; failures are reported as
/// [`StorageError`] and the caller decides how to degrade.
pub trait KvStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Capability probe. Must never fail; returns `false` when the backend
    /// cannot currently read and write.
    fn is_available(&self) -> bool;
}

// ============================================================================
// In-memory store
// ============================================================================

/// Volatile store backed by a `HashMap`. Always available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

// ============================================================================
// File store
// ============================================================================

/// Durable store keeping one file per key under a state directory.
///
/// Keys are fixed, well-known names chosen by the session layer, so they map
/// directly to file names without escaping.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the state directory. Never fails: if the
    /// directory cannot be created the store simply reports unavailable.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(err) = fs::create_dir_all(&dir) {
            log::warn!("cannot create state directory {}: {err}", dir.display());
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value).map_err(|err| StorageError::Write {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    fn is_available(&self) -> bool {
        // Probe with a real write; permissions problems only show up here.
        let probe = self.dir.join(".probe");
        let ok = fs::File::create(&probe)
            .and_then(|mut f| f.write_all(b"ok"))
            .is_ok();
        let _ = fs::remove_file(&probe);
        ok
    }
}

// ============================================================================
// Tests
// ============================================================================
