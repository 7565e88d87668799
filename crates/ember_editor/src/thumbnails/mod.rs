//! Asset preview thumbnails
//!
//! Generation runs through a FIFO task pool advanced once per editor
//! tick; finished thumbnails land in an in-memory cache backed by
//! `<handle>.png` files on disk.

mod manager;
mod pool;
mod renderer;
mod task;

pub use manager::ThumbnailManager;
pub use pool::ThumbnailTaskPool;
pub use renderer::ThumbnailRenderer;
pub use task::{TaskFlags, TaskStatus, ThumbnailTask};

/// Largest dimension of a generated thumbnail, in pixels
pub const THUMBNAIL_SIZE: u32 = 200;

/// A generated preview image (RGBA8)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA pixel data
    pub data: Vec<u8>,
}

impl Thumbnail {
    /// Whether dimensions and buffer length agree
    pub fn is_well_formed(&self) -> bool {
        self.data.len() == (self.width * self.height * 4) as usize
    }
}
