//! Key-value persistence backends
//!
//! The auth session persists a handful of string flags (session token,
//! guest marker, onboarding state, pending verification email). Backend
//! choice is owned by the composition root: any [`KeyValueStore`]
//! implementation can be handed to the session facade.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value persistence used by the auth session.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, overwriting any previous one.
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
