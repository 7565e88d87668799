//! # ember_editor - Editor-side asset tooling
//!
//! Builds on `ember_asset` with the pieces an asset browser needs:
//! thumbnail generation (task pool, per-type renderers, disk cache)
//! and the [`EditorContext`] that wires the collaborators together.

pub mod context;
pub mod thumbnails;

pub use context::EditorContext;
pub use thumbnails::{
    TaskFlags, TaskStatus, Thumbnail, ThumbnailManager, ThumbnailRenderer, ThumbnailTask,
    ThumbnailTaskPool, THUMBNAIL_SIZE,
};
