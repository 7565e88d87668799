//! Off-screen render target
//!
//! Float color plus depth buffers with RGBA8 host readback. This is
//! the composite buffer the preview renderer draws into; the editor
//! reads it back to build thumbnails.

/// Off-screen color + depth target
#[derive(Clone, Debug)]
pub struct RenderTarget {
    width: u32,
    height: u32,
    color: Vec<[f32; 4]>,
    depth: Vec<f32>,
}

impl RenderTarget {
    /// Create a target with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            color: vec![[0.0; 4]; len],
            depth: vec![1.0; len],
        }
    }

    /// Resize the target, discarding contents; no-op if unchanged
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        let len = (width * height) as usize;
        self.width = width;
        self.height = height;
        self.color = vec![[0.0; 4]; len];
        self.depth = vec![1.0; len];
    }

    /// Target size (width, height)
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Clear color and depth
    pub fn clear(&mut self, color: [f32; 4]) {
        self.color.fill(color);
        self.depth.fill(1.0);
    }

    /// Depth-tested pixel write; returns true if the pixel was written
    pub fn set_pixel_with_depth(&mut self, x: u32, y: u32, z: f32, color: [f32; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = (y * self.width + x) as usize;
        if z < self.depth[idx] {
            self.depth[idx] = z;
            self.color[idx] = color;
            true
        } else {
            false
        }
    }

    /// Read a pixel back (linear float color)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.color[(y * self.width + x) as usize])
    }

    /// Copy the composite into a host RGBA8 buffer
    pub fn copy_to_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color.len() * 4);
        for px in &self.color {
            for &c in px {
                out.push((c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8);
            }
        }
    }
}
