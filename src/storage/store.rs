//! The persisted entry list.
//!
//! Loaded once when opened, changed only through [`EntryStore::merge`], and
//! written back before `merge` returns whenever it changes.
//!
//! Two processes opening the same slot hold two independent copies. Their
//! merges are not coordinated: whichever writes last replaces the whole
//! list, and the other process only sees that after [`EntryStore::reload`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{Entry, EntryPayload, StorageConfig};
use crate::pipeline::merge_entries;
use crate::storage::{SlotStorage, slot_key};

/// Maximum number of entries kept.
pub const MAX_ENTRIES: usize = 50;

/// Deduplicated, bounded, ordered list of entries backed by a storage slot.
pub struct EntryStore {
    storage: Arc<dyn SlotStorage>,
    key: String,
    entries: RwLock<Vec<Entry>>,
    /// Held across a merge, including its write.
    merge_lock: Mutex<()>,
}

impl EntryStore {
    /// Open the configured slot and load its entries.
    pub async fn open(storage: Arc<dyn SlotStorage>, config: &StorageConfig) -> Result<Self> {
        let key = slot_key(config);
        let entries = load_entries(storage.as_ref(), &key).await?;
        log::debug!(
            "Loaded {} entries from {}",
            entries.len(),
            storage.location(&key)
        );

        Ok(Self {
            storage,
            key,
            entries: RwLock::new(entries),
            merge_lock: Mutex::new(()),
        })
    }

    /// Snapshot of the current list, most recent first.
    pub fn entries(&self) -> Vec<Entry> {
        self.read().clone()
    }

    /// The entry at the head of the list.
    pub fn latest(&self) -> Option<Entry> {
        self.read().first().cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Where the list is persisted.
    pub fn location(&self) -> String {
        self.storage.location(&self.key)
    }

    /// Re-read the slot, picking up writes from other processes.
    pub async fn reload(&self) -> Result<()> {
        let _guard = self.merge_lock.lock().await;
        let entries = load_entries(self.storage.as_ref(), &self.key).await?;
        *self.write() = entries;
        Ok(())
    }

    /// Merge a scraped batch and persist the result if it changed.
    ///
    /// Returns whether the list changed. If the write fails the in-memory
    /// list is left as it was and the error is returned.
    pub async fn merge(&self, new_entries: &[Entry]) -> Result<bool> {
        let _guard = self.merge_lock.lock().await;

        let current = self.entries();
        let merged = merge_entries(&current, new_entries, MAX_ENTRIES);
        if merged == current {
            log::debug!("Merge of {} entries changed nothing", new_entries.len());
            return Ok(false);
        }

        let payloads: Vec<EntryPayload> = merged.iter().map(Entry::payload).collect();
        let bytes = serde_json::to_vec_pretty(&payloads)?;
        self.storage.write_bytes(&self.key, &bytes).await?;

        log::info!(
            "Entry list updated: {} -> {} entries",
            current.len(),
            merged.len()
        );
        *self.write() = merged;
        Ok(true)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read and decode a slot. Malformed elements are dropped one by one; a slot
/// that is not a JSON array at all loads as empty.
async fn load_entries(storage: &dyn SlotStorage, key: &str) -> Result<Vec<Entry>> {
    let Some(bytes) = storage.read_bytes(key).await? else {
        return Ok(Vec::new());
    };

    let values: Vec<serde_json::Value> = match serde_json::from_slice(&bytes) {
        Ok(values) => values,
        Err(e) => {
            log::warn!("Ignoring unreadable entry list at {}: {}", storage.location(key), e);
            return Ok(Vec::new());
        }
    };

    let total = values.len();
    let entries: Vec<Entry> = values.iter().filter_map(Entry::from_payload).collect();
    if entries.len() < total {
        log::debug!("Dropped {} malformed entries", total - entries.len());
    }
    Ok(entries)
}
