//! Scene (de)serialization (`.escn`, pretty JSON)

use std::fs;
use std::path::Path;

use crate::asset::{Asset, AssetPayload};
use crate::error::AssetError;
use crate::scene::SceneAsset;

pub(super) fn serialize(asset: &Asset, path: &Path) -> Result<u64, AssetError> {
    let scene = asset
        .as_scene()
        .ok_or(AssetError::UnsupportedType(asset.asset_type()))?;
    let json = serde_json::to_string_pretty(scene)?;
    super::ensure_parent_dir(path)?;
    fs::write(path, &json)?;
    Ok(json.len() as u64)
}

pub(super) fn deserialize(path: &Path) -> Result<AssetPayload, AssetError> {
    let text = fs::read_to_string(path)?;
    let scene: SceneAsset = serde_json::from_str(&text)?;
    Ok(AssetPayload::Scene(scene))
}
