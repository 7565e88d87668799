//! Host-side texture resource
//!
//! Decoded pixel data ready for upload or preview use. Standard
//! images decode to RGBA8; Radiance HDR files keep float pixels so
//! tone mapping can happen at display/export time.

use std::path::Path;

use crate::RenderError;

/// Pixel format of a [`Texture`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGBA, sRGB-encoded
    Rgba8,
    /// 32-bit float RGBA, linear (HDR sources)
    RgbaF32,
}

#[derive(Clone, Debug)]
enum Pixels {
    Rgba8(Vec<u8>),
    RgbaF32(Vec<f32>),
}

/// Decoded texture data
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Pixels,
}

impl Texture {
    /// Decode a texture from an image file (PNG, JPG, BMP, HDR)
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let img = image::open(path)?;
        let texture = Self::from_image(img);
        log::debug!(
            "loaded texture {} ({}x{}, {:?})",
            path.display(),
            texture.width,
            texture.height,
            texture.format()
        );
        Ok(texture)
    }

    /// Decode a texture from in-memory image bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, RenderError> {
        let img = image::load_from_memory(data)?;
        Ok(Self::from_image(img))
    }

    fn from_image(img: image::DynamicImage) -> Self {
        match img {
            image::DynamicImage::ImageRgb32F(_) | image::DynamicImage::ImageRgba32F(_) => {
                let rgba = img.to_rgba32f();
                let (width, height) = rgba.dimensions();
                Self {
                    width,
                    height,
                    pixels: Pixels::RgbaF32(rgba.into_raw()),
                }
            }
            _ => {
                let rgba = img.to_rgba8();
                let (width, height) = rgba.dimensions();
                Self {
                    width,
                    height,
                    pixels: Pixels::Rgba8(rgba.into_raw()),
                }
            }
        }
    }

    /// Create a texture from raw RGBA8 pixels
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels: Pixels::Rgba8(data),
        }
    }

    /// Create a texture from raw float RGBA pixels
    pub fn from_rgba_f32(width: u32, height: u32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels: Pixels::RgbaF32(data),
        }
    }

    /// Create a 1x1 solid color texture (useful for defaults)
    pub fn solid_color(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_rgba8(1, 1, vec![r, g, b, a])
    }

    /// Create a checkerboard pattern texture
    pub fn checkerboard(size: u32, tile_size: u32, color1: [u8; 4], color2: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let tx = x / tile_size;
                let ty = y / tile_size;
                let color = if (tx + ty) % 2 == 0 { color1 } else { color2 };
                data.extend_from_slice(&color);
            }
        }
        Self::from_rgba8(size, size, data)
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel format
    pub fn format(&self) -> TextureFormat {
        match self.pixels {
            Pixels::Rgba8(_) => TextureFormat::Rgba8,
            Pixels::RgbaF32(_) => TextureFormat::RgbaF32,
        }
    }

    /// Whether this texture carries float (HDR) pixels
    pub fn is_hdr(&self) -> bool {
        self.format() == TextureFormat::RgbaF32
    }

    /// Raw 8-bit pixels, if this is an RGBA8 texture
    pub fn rgba8_pixels(&self) -> Option<&[u8]> {
        match &self.pixels {
            Pixels::Rgba8(data) => Some(data),
            Pixels::RgbaF32(_) => None,
        }
    }

    /// Raw float pixels, if this is an HDR texture
    pub fn f32_pixels(&self) -> Option<&[f32]> {
        match &self.pixels {
            Pixels::Rgba8(_) => None,
            Pixels::RgbaF32(data) => Some(data),
        }
    }

    /// Encode to a PNG file
    ///
    /// Float pixels are tone mapped with gamma 2.2 first.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let mut rgba = Vec::new();
        self.copy_to_rgba8(2.2, &mut rgba);
        let img = image::RgbaImage::from_raw(self.width, self.height, rgba).ok_or_else(|| {
            RenderError::InvalidGeometry("pixel buffer does not match dimensions".into())
        })?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Copy pixels into a host RGBA8 buffer
    ///
    /// Float pixels are gamma-encoded with the given exponent (2.2 for
    /// display) and clamped before quantization; 8-bit pixels copy
    /// through unchanged.
    pub fn copy_to_rgba8(&self, gamma: f32, out: &mut Vec<u8>) {
        out.clear();
        match &self.pixels {
            Pixels::Rgba8(data) => out.extend_from_slice(data),
            Pixels::RgbaF32(data) => {
                let inv_gamma = 1.0 / gamma;
                out.reserve(data.len());
                for (i, &v) in data.iter().enumerate() {
                    // Alpha stays linear
                    let encoded = if i % 4 == 3 {
                        v.clamp(0.0, 1.0)
                    } else {
                        v.clamp(0.0, 1.0).powf(inv_gamma)
                    };
                    out.push((encoded * 255.0 + 0.5) as u8);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color() {
        let tex = Texture::solid_color(10, 20, 30, 255);
        assert_eq!(tex.width(), 1);
        assert_eq!(tex.height(), 1);
        assert_eq!(tex.format(), TextureFormat::Rgba8);
        assert_eq!(tex.rgba8_pixels().unwrap(), &[10, 20, 30, 255]);
    }

    #[test]
    fn test_checkerboard_dimensions() {
        let tex = Texture::checkerboard(8, 4, [255, 0, 0, 255], [0, 0, 255, 255]);
        assert_eq!(tex.width(), 8);
        assert_eq!(tex.height(), 8);
        assert_eq!(tex.rgba8_pixels().unwrap().len(), 8 * 8 * 4);
        // First tile is color1, tile at (4,0) is color2
        let data = tex.rgba8_pixels().unwrap();
        assert_eq!(&data[0..4], &[255, 0, 0, 255]);
        assert_eq!(&data[4 * 4..4 * 4 + 4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_hdr_gamma_quantization() {
        let tex = Texture::from_rgba_f32(1, 1, vec![1.0, 0.0, 2.5, 1.0]);
        assert!(tex.is_hdr());

        let mut out = Vec::new();
        tex.copy_to_rgba8(2.2, &mut out);
        // 1.0 encodes to exactly 255, over-range clamps, alpha linear
        assert_eq!(out, vec![255, 0, 255, 255]);
    }

    #[test]
    fn test_rgba8_copy_through() {
        let tex = Texture::from_rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let mut out = Vec::new();
        tex.copy_to_rgba8(2.2, &mut out);
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
