//! Surface material parameters
//!
//! PBR-lite material description shared by the viewport and preview
//! renderers. Serializes to the `.emat` JSON payload.

use serde::{Deserialize, Serialize};

/// Surface material parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Base color (linear RGBA)
    pub base_color: [f32; 4],
    /// Metallic factor
    pub metallic: f32,
    /// Roughness factor
    pub roughness: f32,
    /// Ambient occlusion factor
    #[serde(default = "default_ao")]
    pub ao: f32,
    /// Emissive color (linear RGB)
    #[serde(default)]
    pub emissive: [f32; 3],
}

fn default_ao() -> f32 {
    1.0
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            ao: 1.0,
            emissive: [0.0, 0.0, 0.0],
        }
    }
}

impl Material {
    /// Create a named material with default parameters
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
