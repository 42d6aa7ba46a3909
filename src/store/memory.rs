//! Volatile in-memory store

use dashmap::DashMap;

use super::{KeyValueStore, StoreError};

/// In-memory store for web-view shells and tests.
///
/// Contents live only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let store = MemoryStore::new();
        store.save("token", "abc123").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_get_absent_key() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::new();
        store.save("token", "old").unwrap();
        store.save("token", "new").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.save("guest", "true").unwrap();
        store.remove("guest").unwrap();
        store.remove("guest").unwrap();
        assert!(store.get("guest").unwrap().is_none());
    }
}
