//! Versioned capture progress and its durable store.

use crate::error::ProgressError;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Which items of one content version have been captured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub items: Vec<bool>,
    #[serde(default)]
    pub completed_ever: bool,
}

impl CollectionRecord {
    pub fn fresh(item_count: usize) -> Self {
        Self {
            items: vec![false; item_count],
            completed_ever: false,
        }
    }

    pub fn captured_count(&self) -> usize {
        self.items.iter().filter(|c| **c).count()
    }

    pub fn is_captured(&self, index: usize) -> bool {
        self.items.get(index).copied().unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.captured_count() == self.items.len()
    }
}

/// Serialized shapes accepted on load.
///
/// Older builds stored a bare array of booleans; current builds store the
/// full record. Both map onto [`CollectionRecord`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredProgress {
    Legacy(Vec<bool>),
    Current(CollectionRecord),
}

impl From<StoredProgress> for CollectionRecord {
    fn from(stored: StoredProgress) -> Self {
        match stored {
            // completion is never inferred from legacy data
            StoredProgress::Legacy(items) => CollectionRecord {
                items,
                completed_ever: false,
            },
            StoredProgress::Current(record) => record,
        }
    }
}

/// Reads and writes one version's [`CollectionRecord`] under a fixed key.
pub struct ProgressStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Load the stored record, or a fresh one when nothing valid is stored.
    ///
    /// A record of the wrong length or one that fails to parse is removed
    /// from storage before the fresh record is returned.
    pub fn load(&mut self, expected_item_count: usize) -> CollectionRecord {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("[progress] no saved progress under {}", self.key);
                return CollectionRecord::fresh(expected_item_count);
            }
            Err(e) => {
                log::warn!("[progress] read failed for {}: {}", self.key, e);
                return CollectionRecord::fresh(expected_item_count);
            }
        };

        match serde_json::from_str::<StoredProgress>(&raw) {
            Ok(stored) => {
                let record = CollectionRecord::from(stored);
                if record.items.len() == expected_item_count {
                    log::info!(
                        "[progress] loaded {}/{} captured (completed_ever={})",
                        record.captured_count(),
                        expected_item_count,
                        record.completed_ever
                    );
                    return record;
                }
                log::warn!(
                    "[progress] saved item count {} does not match {}; starting fresh",
                    record.items.len(),
                    expected_item_count
                );
            }
            Err(e) => {
                log::warn!("[progress] could not parse saved progress: {}", e);
            }
        }

        self.discard();
        CollectionRecord::fresh(expected_item_count)
    }

    /// Overwrite the stored value with `record`.
    pub fn save(&mut self, record: &CollectionRecord) -> Result<(), ProgressError> {
        let encoded = serde_json::to_string(record)?;
        self.store.set(&self.key, &encoded)?;
        log::debug!("[progress] saved {}", self.key);
        Ok(())
    }

    /// Delete the stored record. In-memory state is left alone; the caller
    /// restarts the session so the next `load` starts clean.
    pub fn reset(&mut self) -> Result<(), ProgressError> {
        self.store.remove(&self.key)?;
        log::info!("[progress] cleared {}", self.key);
        Ok(())
    }

    fn discard(&mut self) {
        if let Err(e) = self.store.remove(&self.key) {
            log::warn!("[progress] could not remove {}: {}", self.key, e);
        }
    }
}
