//! Storage abstractions for the shared entry list.
//!
//! The list lives in one named slot of a key-value store that every process
//! of the application can reach. Each process keeps its own in-memory copy
//! (see [`EntryStore`]); there is no cross-process lock.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml                              # CLI configuration
//! └── group.ch.laurinbrandner.Shaneglish/      # Shared namespace
//!     └── entries.json                         # The entry list slot
//! ```

pub mod local;
pub mod memory;
pub mod store;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::StorageConfig;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use store::{EntryStore, MAX_ENTRIES};

/// Trait for durable key-value backends.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    /// Read a slot, returning `None` if it was never written.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace a slot's content. Returns once the data is durable.
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Human-readable location of a slot, for logs.
    fn location(&self, key: &str) -> String;
}

/// Storage key of the entry list for the configured namespace.
pub fn slot_key(config: &StorageConfig) -> String {
    format!("{}/{}.json", config.namespace, config.slot)
}
