//! Asset registry
//!
//! Thread-safe handle -> metadata map. This is the single source of
//! truth for which assets exist; caches and the thumbnail layer hold
//! handles and come back here for everything else.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::handle::AssetHandle;
use crate::metadata::AssetMetadata;

/// Handle -> metadata map behind a mutex
#[derive(Debug, Default)]
pub struct AssetRegistry {
    entries: Mutex<HashMap<AssetHandle, AssetMetadata>>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up metadata, inserting a null entry on a miss
    ///
    /// The inserted entry keeps `AssetHandle::INVALID`, so callers
    /// must check `is_valid()` on the result.
    pub fn get(&self, handle: AssetHandle) -> AssetMetadata {
        self.entries.lock().entry(handle).or_default().clone()
    }

    /// Look up metadata without touching the map
    pub fn find(&self, handle: AssetHandle) -> Option<AssetMetadata> {
        self.entries.lock().get(&handle).cloned()
    }

    /// Insert or replace metadata, keyed by its own handle
    pub fn insert(&self, metadata: AssetMetadata) {
        self.entries.lock().insert(metadata.handle, metadata);
    }

    /// Mutate an entry in place; returns false if absent
    pub fn update(&self, handle: AssetHandle, f: impl FnOnce(&mut AssetMetadata)) -> bool {
        match self.entries.lock().get_mut(&handle) {
            Some(metadata) => {
                f(metadata);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, handle: AssetHandle) -> bool {
        self.entries.lock().contains_key(&handle)
    }

    /// Remove an entry; returns its metadata if it existed
    pub fn remove(&self, handle: AssetHandle) -> Option<AssetMetadata> {
        self.entries.lock().remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clone of every entry, in no particular order
    pub fn snapshot(&self) -> Vec<AssetMetadata> {
        self.entries.lock().values().cloned().collect()
    }

    /// Every key, in no particular order
    pub fn handles(&self) -> Vec<AssetHandle> {
        self.entries.lock().keys().copied().collect()
    }
}
