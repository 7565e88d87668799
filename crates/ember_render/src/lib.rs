//! # ember_render - Render resources and preview renderer
//!
//! Backend-agnostic render resource types plus a self-contained
//! software forward renderer:
//!
//! - **Texture**: host-side pixel data (8-bit and float/HDR)
//! - **Material**: PBR-lite surface parameters
//! - **MeshSource**: imported geometry (submeshes, nodes, bounds)
//! - **SceneRenderer**: off-screen forward pass with host readback
//!
//! The renderer exists so editor-side previews (viewport thumbnails,
//! material spheres) share one render path without requiring a GPU
//! device. It exposes the same surface a GPU-backed implementation
//! would: viewport sizing, render-to-composite, composite readback.

pub mod camera;
pub mod light;
pub mod material;
pub mod mesh;
pub mod renderer;
pub mod target;
pub mod texture;

pub use camera::OrbitCamera;
pub use light::{DirectionalLight, PointLight};
pub use material::Material;
pub use mesh::{Aabb, MeshNode, MeshSource, Submesh, Vertex};
pub use renderer::{MeshInstance, RenderScene, SceneRenderer};
pub use target::RenderTarget;
pub use texture::{Texture, TextureFormat};

use thiserror::Error;

/// Errors from render resource handling
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error reading a resource file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Image decode/encode error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// Geometry that cannot be rendered (empty, out-of-range indices)
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}
