//! Texture (de)serialization
//!
//! The source image file is the canonical persisted form; the editor
//! never rewrites it. Serialization therefore degenerates to a no-op
//! and deserialization to an image decode.

use std::path::Path;

use ember_render::Texture;

use crate::asset::{Asset, AssetPayload};
use crate::error::AssetError;

pub(super) fn serialize(_asset: &Asset, _path: &Path) -> Result<u64, AssetError> {
    Ok(0)
}

pub(super) fn deserialize(path: &Path) -> Result<AssetPayload, AssetError> {
    let texture = Texture::load(path)?;
    Ok(AssetPayload::Texture(texture))
}
