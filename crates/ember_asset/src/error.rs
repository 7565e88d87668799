use std::path::PathBuf;

use thiserror::Error;

use crate::types::AssetType;

/// Errors from asset serialization and registry persistence
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("render resource error: {0}")]
    Render(#[from] ember_render::RenderError),

    #[error("no serializer for asset type {0}")]
    UnsupportedType(AssetType),

    #[error("corrupt asset file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}
