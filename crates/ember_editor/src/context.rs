//! Editor context
//!
//! Owns the long-lived editor collaborators and wires them together.
//! Everything is passed explicitly; there is no global state, so tests
//! and tools can run several independent contexts side by side.

use std::path::PathBuf;

use ember_asset::{AssetHandle, AssetManager, AssetManagerConfig};

use crate::thumbnails::ThumbnailManager;

/// Directory under the asset root holding cached thumbnails
pub const THUMBNAIL_CACHE_DIR: &str = "cache/thumbnails";

/// Root object owning the editor's asset and thumbnail state
pub struct EditorContext {
    pub assets: AssetManager,
    pub thumbnails: ThumbnailManager,
}

impl EditorContext {
    /// Build a context for a project rooted at the given directory
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        let config = AssetManagerConfig::rooted_at(asset_root);
        let cache_dir = config.asset_root.join(THUMBNAIL_CACHE_DIR);
        Self {
            assets: AssetManager::new(config),
            thumbnails: ThumbnailManager::new(cache_dir),
        }
    }

    /// Per-tick work: advance thumbnail generation one stage
    pub fn update(&mut self) {
        self.thumbnails.update(&mut self.assets);
    }

    /// Import a file and queue its thumbnail
    pub fn import_with_thumbnail(&mut self, path: impl AsRef<std::path::Path>) -> AssetHandle {
        let handle = self.assets.import_asset(path);
        if handle.is_valid() {
            self.thumbnails.request_thumbnail(handle);
        }
        handle
    }

    /// Drop thumbnails whose assets left the registry
    pub fn evict_stale_thumbnails(&mut self) -> usize {
        let live = self.assets.live_handles();
        self.thumbnails.evict_stale(&live)
    }
}
