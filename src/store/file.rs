//! File-backed store
//!
//! Persists the key-value map as a single JSON document under the
//! platform config directory. The document is read once on open and
//! rewritten on every mutation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use tracing::{info, warn};

use super::{KeyValueStore, StoreError};

/// File-backed key-value store for native desktop builds.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at the default platform location
    /// (`<config_dir>/authkeep/store.json`).
    pub fn open() -> Result<Self, StoreError> {
        let path = crate::app_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "platform config directory unavailable",
                )
            })?
            .join("store.json");
        Self::open_at(path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(map) => {
                    info!("Loaded store from {:?}", path);
                    map
                }
                Err(e) => {
                    // An unreadable store is treated as empty rather than
                    // blocking startup; the next write replaces it.
                    warn!("Failed to parse store file {:?}: {}", path, e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}
