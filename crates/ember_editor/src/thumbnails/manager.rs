//! Thumbnail manager
//!
//! Front of the thumbnail pipeline. Owns the in-memory cache, the
//! disk cache directory and the task pool. Lookups are passive: a
//! cache miss returns `None` (after probing the disk cache) and never
//! schedules work; generation happens only through an explicit
//! [`ThumbnailManager::request_thumbnail`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ember_asset::{AssetHandle, AssetManager};
use ember_render::Texture;

use super::pool::ThumbnailTaskPool;
use super::renderer::ThumbnailRenderer;
use super::task::TaskFlags;
use super::Thumbnail;

/// Caches and generates asset preview thumbnails
pub struct ThumbnailManager {
    cache: HashMap<AssetHandle, Thumbnail>,
    cache_dir: PathBuf,
    pool: ThumbnailTaskPool,
    renderer: ThumbnailRenderer,
}

impl ThumbnailManager {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache: HashMap::new(),
            cache_dir: cache_dir.into(),
            pool: ThumbnailTaskPool::new(),
            renderer: ThumbnailRenderer::new(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Fetch a cached thumbnail, hydrating from disk on a memory miss
    ///
    /// Never schedules generation; callers that want a thumbnail built
    /// use [`Self::request_thumbnail`].
    pub fn get_thumbnail(&mut self, handle: AssetHandle) -> Option<&Thumbnail> {
        if !self.cache.contains_key(&handle) {
            self.hydrate_from_disk(handle);
        }
        self.cache.get(&handle)
    }

    /// Whether a thumbnail is resident in memory
    pub fn has_thumbnail(&self, handle: AssetHandle) -> bool {
        self.cache.contains_key(&handle)
    }

    /// Queue generation for a handle
    ///
    /// No-op (returning false) when a thumbnail is already cached in
    /// memory or a task for the handle is queued.
    pub fn request_thumbnail(&mut self, handle: AssetHandle) -> bool {
        if !handle.is_valid() || self.cache.contains_key(&handle) || self.pool.contains(handle) {
            return false;
        }
        let submitted = self.pool.submit(handle, TaskFlags::ALL).is_some();
        if submitted {
            self.pool.start();
        }
        submitted
    }

    /// Re-render a thumbnail even if one is cached
    pub fn invalidate_thumbnail(&mut self, handle: AssetHandle) {
        self.cache.remove(&handle);
        let _ = std::fs::remove_file(self.cache_path(handle));
        self.request_thumbnail(handle);
    }

    /// Advance generation by one stage; call once per editor tick
    pub fn update(&mut self, assets: &mut AssetManager) {
        if let Some(task) = self.pool.update(assets, &mut self.renderer, &self.cache_dir) {
            let handle = task.handle;
            match task.into_output() {
                Some(thumbnail) => {
                    self.cache.insert(handle, thumbnail);
                }
                None => log::debug!("no thumbnail produced for {handle}"),
            }
        }
    }

    /// Queued task count
    pub fn pending(&self) -> usize {
        self.pool.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pool.is_empty()
    }

    /// Drop cached thumbnails for assets that no longer exist
    ///
    /// Cross-references the live handle set: memory entries are
    /// retained only for live handles and stale disk cache files are
    /// deleted. Returns the number of evicted thumbnails.
    pub fn evict_stale(&mut self, live_handles: &[AssetHandle]) -> usize {
        let before = self.cache.len();
        self.cache
            .retain(|handle, _| live_handles.contains(handle));
        let mut evicted = before - self.cache.len();

        if let Ok(entries) = std::fs::read_dir(&self.cache_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("png") {
                    continue;
                }
                let Some(handle) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(AssetHandle::new)
                else {
                    continue;
                };
                if !live_handles.contains(&handle) && std::fs::remove_file(&path).is_ok() {
                    evicted += 1;
                }
            }
        }

        if evicted > 0 {
            log::debug!("evicted {evicted} stale thumbnails");
        }
        evicted
    }

    fn cache_path(&self, handle: AssetHandle) -> PathBuf {
        self.cache_dir.join(format!("{handle}.png"))
    }

    fn hydrate_from_disk(&mut self, handle: AssetHandle) {
        let path = self.cache_path(handle);
        if !path.exists() {
            return;
        }
        match Texture::load(&path) {
            Ok(texture) => {
                let Some(pixels) = texture.rgba8_pixels() else {
                    return;
                };
                self.cache.insert(
                    handle,
                    Thumbnail {
                        width: texture.width(),
                        height: texture.height(),
                        data: pixels.to_vec(),
                    },
                );
            }
            Err(err) => {
                log::warn!("could not read cached thumbnail {}: {err}", path.display());
            }
        }
    }
}
