//! Per-type asset serialization
//!
//! One entry point per direction, dispatching on the metadata type
//! tag. Paths in metadata are relative; both entry points resolve
//! them against the caller's asset root.

mod material;
mod mesh;
mod scene;
mod texture;

pub use mesh::{MESH_MAGIC, MESH_VERSION};

use std::path::Path;

use crate::asset::Asset;
use crate::error::AssetError;
use crate::metadata::AssetMetadata;
use crate::types::AssetType;

/// Write an asset's payload to its backing file
///
/// Returns the number of bytes written. Textures are a no-op (the
/// source image is already the persisted form) and report zero.
pub fn serialize_asset(
    metadata: &AssetMetadata,
    asset: &Asset,
    asset_root: &Path,
) -> Result<u64, AssetError> {
    let path = metadata.absolute_path(asset_root);
    match metadata.asset_type {
        AssetType::Texture => texture::serialize(asset, &path),
        AssetType::Material => material::serialize(asset, &path),
        AssetType::MeshSource => mesh::serialize(asset, &path),
        AssetType::Scene => scene::serialize(asset, &path),
        AssetType::Unknown => Err(AssetError::UnsupportedType(metadata.asset_type)),
    }
}

/// Read an asset's payload from its backing file
///
/// The returned asset carries the metadata's handle.
pub fn deserialize_asset(metadata: &AssetMetadata, asset_root: &Path) -> Result<Asset, AssetError> {
    let path = metadata.absolute_path(asset_root);
    let payload = match metadata.asset_type {
        AssetType::Texture => texture::deserialize(&path)?,
        AssetType::Material => material::deserialize(&path)?,
        AssetType::MeshSource => mesh::deserialize(&path)?,
        AssetType::Scene => scene::deserialize(&path)?,
        AssetType::Unknown => return Err(AssetError::UnsupportedType(metadata.asset_type)),
    };
    Ok(Asset::new(metadata.handle, payload))
}

fn ensure_parent_dir(path: &Path) -> Result<(), AssetError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
