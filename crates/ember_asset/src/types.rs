//! Asset type tags
//!
//! One closed enum covers every kind of asset the editor understands.
//! Behavior that varies per kind (serialization, thumbnails) matches
//! on the tag instead of dispatching through trait objects.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of asset a handle refers to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Unrecognized or unset
    #[default]
    Unknown,
    /// Image file (png, jpg, bmp, hdr, ...)
    Texture,
    /// Authored material description (`.emat`)
    Material,
    /// Mesh geometry container (`.emsh`)
    MeshSource,
    /// Scene description (`.escn`)
    Scene,
}

impl AssetType {
    /// Classify a file by its extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "tga" | "hdr" => Self::Texture,
            "emat" => Self::Material,
            "emsh" => Self::MeshSource,
            "escn" => Self::Scene,
            _ => Self::Unknown,
        }
    }

    /// Classify a file by its path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Stable name used in the registry file
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Texture => "Texture",
            Self::Material => "Material",
            Self::MeshSource => "MeshSource",
            Self::Scene => "Scene",
        }
    }

    /// Parse a registry file type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Unknown" => Some(Self::Unknown),
            "Texture" => Some(Self::Texture),
            "Material" => Some(Self::Material),
            "MeshSource" => Some(Self::MeshSource),
            "Scene" => Some(Self::Scene),
            _ => None,
        }
    }

    /// Canonical file extension for authored asset files
    ///
    /// Textures keep the extension of their source image and have no
    /// canonical one.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Material => Some("emat"),
            Self::MeshSource => Some("emsh"),
            Self::Scene => Some("escn"),
            Self::Texture | Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
