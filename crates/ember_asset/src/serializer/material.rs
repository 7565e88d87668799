//! Material (de)serialization (`.emat`, pretty JSON)

use std::fs;
use std::path::Path;

use ember_render::Material;

use crate::asset::{Asset, AssetPayload};
use crate::error::AssetError;

pub(super) fn serialize(asset: &Asset, path: &Path) -> Result<u64, AssetError> {
    let material = asset
        .as_material()
        .ok_or(AssetError::UnsupportedType(asset.asset_type()))?;
    let json = serde_json::to_string_pretty(material)?;
    super::ensure_parent_dir(path)?;
    fs::write(path, &json)?;
    Ok(json.len() as u64)
}

pub(super) fn deserialize(path: &Path) -> Result<AssetPayload, AssetError> {
    let text = fs::read_to_string(path)?;
    let material: Material = serde_json::from_str(&text)?;
    Ok(AssetPayload::Material(material))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::AssetHandle;

    #[test]
    fn test_material_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gold.emat");

        let mut material = Material::named("gold");
        material.metallic = 1.0;
        material.base_color = [1.0, 0.84, 0.0, 1.0];
        let asset = Asset::new(AssetHandle::new(1), AssetPayload::Material(material.clone()));

        let written = serialize(&asset, &path).unwrap();
        assert!(written > 0);

        let payload = deserialize(&path).unwrap();
        match payload {
            AssetPayload::Material(back) => assert_eq!(back, material),
            other => panic!("expected material, got {:?}", other.asset_type()),
        }
    }

    #[test]
    fn test_wrong_payload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let asset = Asset::new(
            AssetHandle::new(1),
            AssetPayload::Scene(crate::scene::SceneAsset::default()),
        );
        assert!(serialize(&asset, &dir.path().join("x.emat")).is_err());
    }
}
