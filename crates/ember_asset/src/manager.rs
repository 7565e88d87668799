//! Editor asset manager
//!
//! Owns the registry, the loaded-asset cache and the memory-asset
//! cache, and drives import, lazy loading, saving, export and removal.
//! Public lookups report failure through sentinels (`None`, an invalid
//! handle) and metadata flags; errors from the serialization layer are
//! logged here and never escape.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::asset::{Asset, AssetPayload};
use crate::handle::AssetHandle;
use crate::metadata::AssetMetadata;
use crate::registry::AssetRegistry;
use crate::registry_io;
use crate::serializer;
use crate::types::AssetType;

/// Where the manager keeps its files
#[derive(Clone, Debug)]
pub struct AssetManagerConfig {
    /// Root directory all asset paths are relative to
    pub asset_root: PathBuf,
    /// Registry file name, resolved under the asset root
    pub registry_file: PathBuf,
}

impl Default for AssetManagerConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            registry_file: PathBuf::from("AssetRegistry.json"),
        }
    }
}

impl AssetManagerConfig {
    /// Config rooted at the given directory with the default registry
    /// file name
    pub fn rooted_at(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            ..Default::default()
        }
    }
}

/// Central owner of asset state for one editor session
pub struct AssetManager {
    config: AssetManagerConfig,
    registry: AssetRegistry,
    /// Deserialized file-backed assets
    loaded: HashMap<AssetHandle, Arc<Asset>>,
    /// Assets that exist only for this session
    memory_assets: HashMap<AssetHandle, Arc<Asset>>,
}

impl AssetManager {
    /// Create a manager, hydrating the registry from disk if present
    pub fn new(config: AssetManagerConfig) -> Self {
        let registry = registry_io::load_registry(&config.asset_root.join(&config.registry_file));
        Self {
            config,
            registry,
            loaded: HashMap::new(),
            memory_assets: HashMap::new(),
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.config.asset_root
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    fn registry_path(&self) -> PathBuf {
        self.config.asset_root.join(&self.config.registry_file)
    }

    /// Mint a handle no registry entry uses yet
    fn mint_handle(&self) -> AssetHandle {
        loop {
            let handle = AssetHandle::random();
            if !self.registry.contains(handle) {
                return handle;
            }
        }
    }

    /// Register a file as an asset
    ///
    /// Idempotent per path: importing an already-registered path
    /// returns the existing handle. Unrecognized extensions return
    /// `AssetHandle::INVALID`.
    pub fn import_asset(&mut self, path: impl AsRef<Path>) -> AssetHandle {
        let relative = self.relative_path(path.as_ref());

        let existing = self.handle_for_path(&relative);
        if existing.is_valid() {
            return existing;
        }

        let asset_type = AssetType::from_path(&relative);
        if asset_type == AssetType::Unknown {
            log::warn!("cannot import {}: unrecognized extension", relative.display());
            return AssetHandle::INVALID;
        }

        let absolute = self.config.asset_root.join(&relative);
        let file_size = fs::metadata(&absolute).map(|m| m.len()).unwrap_or(0);

        let handle = self.mint_handle();
        self.registry
            .insert(AssetMetadata::new(handle, asset_type, &relative, file_size));
        log::info!("imported {} as {asset_type} ({handle})", relative.display());
        handle
    }

    /// Handle registered for a path, or `INVALID`
    pub fn handle_for_path(&self, path: impl AsRef<Path>) -> AssetHandle {
        let relative = self.relative_path(path.as_ref());
        self.registry
            .snapshot()
            .into_iter()
            .find(|meta| meta.is_valid() && meta.file_path == relative)
            .map(|meta| meta.handle)
            .unwrap_or(AssetHandle::INVALID)
    }

    /// Fetch an asset, loading it from disk on first access
    ///
    /// Memory assets are served from their own cache. Returns `None`
    /// for unknown handles and for assets whose file cannot be read;
    /// the latter also sets `is_file_missing` in the metadata.
    pub fn get_asset(&mut self, handle: AssetHandle) -> Option<Arc<Asset>> {
        if let Some(asset) = self.memory_assets.get(&handle) {
            return Some(asset.clone());
        }
        if let Some(asset) = self.loaded.get(&handle) {
            return Some(asset.clone());
        }
        self.load_asset(handle)
    }

    /// Whether a handle refers to a memory-only asset
    pub fn is_memory_asset(&self, handle: AssetHandle) -> bool {
        self.memory_assets.contains_key(&handle)
    }

    /// Metadata for a handle; null sentinel when unknown
    pub fn metadata(&self, handle: AssetHandle) -> AssetMetadata {
        self.registry.find(handle).unwrap_or_default()
    }

    fn load_asset(&mut self, handle: AssetHandle) -> Option<Arc<Asset>> {
        let metadata = self.registry.find(handle)?;
        if !metadata.is_valid() {
            return None;
        }

        match serializer::deserialize_asset(&metadata, &self.config.asset_root) {
            Ok(asset) => {
                self.registry.update(handle, |m| {
                    m.is_data_loaded = true;
                    m.is_file_missing = false;
                });
                let asset = Arc::new(asset);
                self.loaded.insert(handle, asset.clone());
                Some(asset)
            }
            Err(err) => {
                log::error!("failed to load {} ({handle}): {err}", metadata.file_path.display());
                self.registry.update(handle, |m| m.is_file_missing = true);
                None
            }
        }
    }

    /// Register an asset that lives only in memory
    ///
    /// Memory assets are never loaded from or saved to disk and are
    /// excluded from the registry file; use [`Self::export_asset`] to
    /// promote one to a file-backed asset.
    pub fn add_memory_asset(&mut self, payload: AssetPayload) -> AssetHandle {
        let handle = self.mint_handle();
        let asset_type = payload.asset_type();
        self.registry
            .insert(AssetMetadata::new_memory(handle, asset_type));
        self.memory_assets
            .insert(handle, Arc::new(Asset::new(handle, payload)));
        log::debug!("added memory asset {asset_type} ({handle})");
        handle
    }

    /// Record that an asset changed in the editor
    ///
    /// Marked assets are picked up by the next [`Self::save_assets`].
    pub fn mark_modified(&mut self, handle: AssetHandle) {
        self.registry.update(handle, |m| m.mark_modified());
    }

    /// Replace an asset's payload and mark it modified
    ///
    /// Returns false if the handle is unknown or the payload type does
    /// not match the registered one.
    pub fn update_asset(&mut self, handle: AssetHandle, payload: AssetPayload) -> bool {
        let Some(metadata) = self.registry.find(handle) else {
            return false;
        };
        if metadata.asset_type != payload.asset_type() {
            log::warn!(
                "update_asset({handle}): payload type {} does not match registered {}",
                payload.asset_type(),
                metadata.asset_type
            );
            return false;
        }

        let asset = Arc::new(Asset::new(handle, payload));
        if metadata.is_memory_asset {
            self.memory_assets.insert(handle, asset);
        } else {
            self.loaded.insert(handle, asset);
        }
        self.mark_modified(handle);
        true
    }

    /// Save one asset's payload and the registry file
    pub fn save_asset(&mut self, handle: AssetHandle) -> bool {
        let saved = self.write_asset_payload(handle);
        if saved {
            if let Err(err) = registry_io::save_registry(&self.registry, &self.registry_path()) {
                log::error!("failed to save registry: {err}");
            }
        }
        saved
    }

    /// Save every modified asset, then the registry file once
    ///
    /// Memory assets are skipped; entries that lost their validity are
    /// dropped from the registry.
    pub fn save_assets(&mut self) {
        let mut entries = self.registry.snapshot();
        entries.sort_by_key(|meta| meta.handle);

        for meta in entries {
            if meta.is_memory_asset {
                continue;
            }
            if !meta.is_valid() {
                self.registry.remove(meta.handle);
                continue;
            }
            if meta.is_modified() {
                self.write_asset_payload(meta.handle);
            }
        }

        if let Err(err) = registry_io::save_registry(&self.registry, &self.registry_path()) {
            log::error!("failed to save registry: {err}");
        }
    }

    /// Write one payload to disk and sync its metadata stamps
    fn write_asset_payload(&mut self, handle: AssetHandle) -> bool {
        let Some(metadata) = self.registry.find(handle) else {
            return false;
        };
        if !metadata.is_valid() {
            return false;
        }
        let Some(asset) = self.loaded.get(&handle).cloned() else {
            // Never loaded this session; the file already holds the
            // latest state, so close the modification window instead
            // of retrying on every save pass
            self.registry.update(handle, |m| m.mark_saved());
            return false;
        };

        match serializer::serialize_asset(&metadata, &asset, &self.config.asset_root) {
            Ok(written) => {
                self.registry.update(handle, |m| {
                    if written > 0 {
                        m.file_size = written;
                    }
                    m.mark_saved();
                });
                log::debug!("saved {} ({handle})", metadata.file_path.display());
                true
            }
            Err(err) => {
                log::error!("failed to save {} ({handle}): {err}", metadata.file_path.display());
                false
            }
        }
    }

    /// Promote an asset to a file-backed asset at `path`
    ///
    /// Works for memory assets (clearing their memory flag) and for
    /// file-backed assets (a save-as). The handle is kept. Returns
    /// `INVALID` if the handle is unknown or the payload cannot be
    /// written.
    pub fn export_asset(&mut self, handle: AssetHandle, path: impl AsRef<Path>) -> AssetHandle {
        let relative = self.relative_path(path.as_ref());

        let payload_arc = self
            .memory_assets
            .get(&handle)
            .or_else(|| self.loaded.get(&handle))
            .cloned();
        let Some(asset) = payload_arc else {
            log::warn!("export_asset({handle}): no payload in memory");
            return AssetHandle::INVALID;
        };
        let Some(mut metadata) = self.registry.find(handle) else {
            return AssetHandle::INVALID;
        };

        metadata.is_memory_asset = false;
        metadata.file_path = relative.clone();

        match serializer::serialize_asset(&metadata, &asset, &self.config.asset_root) {
            Ok(written) => {
                metadata.file_size = written;
                metadata.is_data_loaded = true;
                metadata.mark_saved();
                self.registry.insert(metadata);

                self.memory_assets.remove(&handle);
                self.loaded.insert(handle, asset);

                if let Err(err) = registry_io::save_registry(&self.registry, &self.registry_path())
                {
                    log::error!("failed to save registry: {err}");
                }
                log::info!("exported {} ({handle})", relative.display());
                handle
            }
            Err(err) => {
                log::error!("failed to export {} ({handle}): {err}", relative.display());
                AssetHandle::INVALID
            }
        }
    }

    /// Remove an asset from the session and delete its files
    ///
    /// Deletes the backing file and its `.asset` companion when they
    /// exist; missing files are not an error. The registry file is
    /// rewritten immediately.
    pub fn remove_asset(&mut self, handle: AssetHandle) {
        self.loaded.remove(&handle);
        self.memory_assets.remove(&handle);

        let Some(metadata) = self.registry.remove(handle) else {
            return;
        };

        if metadata.is_valid() {
            let absolute = metadata.absolute_path(&self.config.asset_root);
            remove_file_if_present(&absolute);
            remove_file_if_present(&companion_path(&absolute));
        }

        if let Err(err) = registry_io::save_registry(&self.registry, &self.registry_path()) {
            log::error!("failed to save registry: {err}");
        }
        log::info!("removed asset {handle}");
    }

    /// Handles of every valid registry entry
    pub fn live_handles(&self) -> Vec<AssetHandle> {
        self.registry
            .snapshot()
            .into_iter()
            .filter(|meta| meta.handle.is_valid())
            .map(|meta| meta.handle)
            .collect()
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.config.asset_root)
            .unwrap_or(path)
            .to_path_buf()
    }
}

/// `<file>.asset` companion next to the backing file
fn companion_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".asset");
    PathBuf::from(os)
}

fn remove_file_if_present(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            log::warn!("could not delete {}: {err}", path.display());
        }
    }
}
