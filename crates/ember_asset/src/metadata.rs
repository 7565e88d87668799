//! Per-asset metadata
//!
//! Metadata lives in the registry and records everything the editor
//! knows about an asset without loading its payload: identity, source
//! path, runtime state flags and modification timestamps. Only handle,
//! path, size and type survive a registry save; flags and timestamps
//! are runtime state.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::handle::AssetHandle;
use crate::types::AssetType;

/// Everything the registry records about one asset
#[derive(Clone, Debug, PartialEq)]
pub struct AssetMetadata {
    /// Identity; `INVALID` marks the null sentinel
    pub handle: AssetHandle,
    pub asset_type: AssetType,
    /// Source path, relative to the asset root; empty for memory assets
    pub file_path: PathBuf,
    /// Size of the backing file in bytes at import/save time
    pub file_size: u64,
    /// Payload has been deserialized into the loaded cache
    pub is_data_loaded: bool,
    /// Asset exists only in memory, never persisted
    pub is_memory_asset: bool,
    /// The last load attempt failed because the file was unreadable
    pub is_file_missing: bool,
    pub created_at: SystemTime,
    /// Last in-editor modification
    pub modified_at: SystemTime,
    /// `modified_at` value at the last successful save
    pub last_modified_at: SystemTime,
}

impl Default for AssetMetadata {
    fn default() -> Self {
        Self {
            handle: AssetHandle::INVALID,
            asset_type: AssetType::Unknown,
            file_path: PathBuf::new(),
            file_size: 0,
            is_data_loaded: false,
            is_memory_asset: false,
            is_file_missing: false,
            created_at: SystemTime::UNIX_EPOCH,
            modified_at: SystemTime::UNIX_EPOCH,
            last_modified_at: SystemTime::UNIX_EPOCH,
        }
    }
}

impl AssetMetadata {
    /// Metadata for a freshly imported file-backed asset
    pub fn new(
        handle: AssetHandle,
        asset_type: AssetType,
        file_path: impl Into<PathBuf>,
        file_size: u64,
    ) -> Self {
        let now = SystemTime::now();
        Self {
            handle,
            asset_type,
            file_path: file_path.into(),
            file_size,
            created_at: now,
            modified_at: now,
            last_modified_at: now,
            ..Default::default()
        }
    }

    /// Metadata for a memory-only asset
    pub fn new_memory(handle: AssetHandle, asset_type: AssetType) -> Self {
        let mut meta = Self::new(handle, asset_type, PathBuf::new(), 0);
        meta.is_memory_asset = true;
        meta
    }

    /// A file-backed asset the editor can work with
    ///
    /// Memory-only assets are deliberately excluded; they are served
    /// from the memory cache and never hit the load/save paths.
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid() && !self.is_memory_asset
    }

    /// Unsaved in-editor changes exist
    pub fn is_modified(&self) -> bool {
        self.modified_at != self.last_modified_at
    }

    /// Record an in-editor modification
    pub fn mark_modified(&mut self) {
        self.modified_at = SystemTime::now();
    }

    /// Record a successful save of the current state
    pub fn mark_saved(&mut self) {
        self.last_modified_at = self.modified_at;
    }

    /// Source path resolved against an asset root
    pub fn absolute_path(&self, asset_root: &Path) -> PathBuf {
        asset_root.join(&self.file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        let meta = AssetMetadata::default();
        assert!(!meta.is_valid());
        assert!(!meta.is_modified());
    }

    #[test]
    fn test_memory_asset_is_not_valid() {
        let meta = AssetMetadata::new_memory(AssetHandle::new(7), AssetType::Material);
        assert!(meta.handle.is_valid());
        assert!(!meta.is_valid());
        assert!(meta.is_memory_asset);
    }

    #[test]
    fn test_modified_tracking() {
        let mut meta = AssetMetadata::new(
            AssetHandle::new(1),
            AssetType::Texture,
            "textures/wood.png",
            1024,
        );
        assert!(!meta.is_modified());

        // now() has nanosecond granularity; a sleep keeps the stamps apart
        std::thread::sleep(std::time::Duration::from_millis(2));
        meta.mark_modified();
        assert!(meta.is_modified());

        meta.mark_saved();
        assert!(!meta.is_modified());
    }
}
