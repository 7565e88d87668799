//! In-memory asset representation
//!
//! An asset is its payload plus the handle it was loaded under. The
//! payload is a closed tagged enum; behavior that varies per kind
//! matches on the tag.

use ember_render::{Material, MeshSource, Texture};

use crate::handle::AssetHandle;
use crate::scene::SceneAsset;
use crate::types::AssetType;

/// Typed asset payload
#[derive(Clone, Debug)]
pub enum AssetPayload {
    Texture(Texture),
    Material(Material),
    MeshSource(MeshSource),
    Scene(SceneAsset),
}

impl AssetPayload {
    /// Type tag for this payload
    pub fn asset_type(&self) -> AssetType {
        match self {
            Self::Texture(_) => AssetType::Texture,
            Self::Material(_) => AssetType::Material,
            Self::MeshSource(_) => AssetType::MeshSource,
            Self::Scene(_) => AssetType::Scene,
        }
    }
}

/// A loaded asset: payload plus identity
#[derive(Clone, Debug)]
pub struct Asset {
    handle: AssetHandle,
    payload: AssetPayload,
}

impl Asset {
    pub fn new(handle: AssetHandle, payload: AssetPayload) -> Self {
        Self { handle, payload }
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub fn asset_type(&self) -> AssetType {
        self.payload.asset_type()
    }

    pub fn payload(&self) -> &AssetPayload {
        &self.payload
    }

    pub fn as_texture(&self) -> Option<&Texture> {
        match &self.payload {
            AssetPayload::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    pub fn as_material(&self) -> Option<&Material> {
        match &self.payload {
            AssetPayload::Material(material) => Some(material),
            _ => None,
        }
    }

    pub fn as_mesh_source(&self) -> Option<&MeshSource> {
        match &self.payload {
            AssetPayload::MeshSource(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_scene(&self) -> Option<&SceneAsset> {
        match &self.payload {
            AssetPayload::Scene(scene) => Some(scene),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_type_tag() {
        let asset = Asset::new(
            AssetHandle::new(3),
            AssetPayload::Material(Material::default()),
        );
        assert_eq!(asset.asset_type(), AssetType::Material);
        assert!(asset.as_material().is_some());
        assert!(asset.as_texture().is_none());
    }
}
