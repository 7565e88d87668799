//! Asset management for the Ember editor
//!
//! Handles, metadata, the persisted registry, per-type serialization
//! and the editor-facing [`AssetManager`]. Rendering payload types
//! (textures, materials, meshes) come from `ember_render`; this crate
//! owns their identity and persistence.

pub mod asset;
pub mod error;
pub mod handle;
pub mod manager;
pub mod metadata;
pub mod registry;
pub mod registry_io;
pub mod scene;
pub mod serializer;
pub mod types;

pub use asset::{Asset, AssetPayload};
pub use error::AssetError;
pub use handle::AssetHandle;
pub use manager::{AssetManager, AssetManagerConfig};
pub use metadata::AssetMetadata;
pub use registry::AssetRegistry;
pub use scene::{SceneAsset, SceneEntity};
pub use types::AssetType;
