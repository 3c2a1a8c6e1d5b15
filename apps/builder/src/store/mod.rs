//! Durable local storage and the record store that owns the live document.
//!
//! Storage is a flat string key-value space with two fixed keys: one for the
//! serialized document and one for the sector tag. Writes are synchronous and
//! happen on every patch.

pub mod file;
pub mod memory;
pub mod record;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use record::RecordStore;

/// Key holding the JSON-serialized `ResumeDocument`.
pub const DOCUMENT_KEY: &str = "resumeBuilderData";
/// Key holding the literal sector tag (`IT` / `Other`).
pub const SECTOR_KEY: &str = "resumeBuilderSector";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted document is corrupt: {0}")]
    PersistedStateCorrupt(#[from] serde_json::Error),

    #[error("persisted document has schema version {found}, newest supported is {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// String key-value storage. Implementations must be cheap enough to call on
/// every edit.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
