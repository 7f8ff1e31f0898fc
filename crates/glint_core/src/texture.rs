//! Texture loading for cube-map environments.
//!
//! Images are decoded with the `image` crate and stored as linear float RGBA
//! so environment lookups need no color conversion at trace time.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported texture format: {0}")]
    UnsupportedFormat(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data in RGBA format (linear, 0-1 range), row-major, top row first
    pub pixels: Vec<[f32; 4]>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    ///
    /// Fails if the pixel count does not match the dimensions or the texture is empty.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<[f32; 4]>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(TextureError::UnsupportedFormat(format!(
                "{} has zero size ({}x{})",
                path, width, height
            )));
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::LoadError(format!(
                "{} expected {} pixels, got {}",
                path,
                width * height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![[color.x, color.y, color.z, 1.0]],
            path: "<solid>".to_string(),
        }
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// UV coordinates are in [0, 1] range, with (0, 0) at bottom-left.
    /// Coordinates outside that range are clamped to the edge.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);

        let x = u * (self.width as f32 - 1.0);
        let y = (1.0 - v) * (self.height as f32 - 1.0); // Flip V for image coordinates

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x.fract();
        let fy = y.fract();

        let p00 = Vec3::from_slice(&self.get_pixel(x0, y0)[..3]);
        let p10 = Vec3::from_slice(&self.get_pixel(x1, y0)[..3]);
        let p01 = Vec3::from_slice(&self.get_pixel(x0, y1)[..3]);
        let p11 = Vec3::from_slice(&self.get_pixel(x1, y1)[..3]);

        let top = p00.lerp(p10, fx);
        let bottom = p01.lerp(p11, fx);
        top.lerp(bottom, fy)
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> [f32; 4] {
        let idx = (y * self.width + x) as usize;
        self.pixels
            .get(idx)
            .copied()
            .unwrap_or([0.0, 0.0, 0.0, 1.0])
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<[f32; 4]>()
    }
}

/// Load a texture from a file path.
pub fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let img = image::open(path)?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    // Convert to linear float RGBA
    let pixels: Vec<[f32; 4]> = rgba
        .pixels()
        .map(|p| {
            [
                srgb_to_linear(p[0]),
                srgb_to_linear(p[1]),
                srgb_to_linear(p[2]),
                p[3] as f32 / 255.0, // Alpha is linear
            ]
        })
        .collect();

    let texture = Texture::new(width, height, pixels, path.to_string_lossy())?;

    log::debug!(
        "Loaded texture: {} ({}x{}, {:.1} KB)",
        texture.path,
        texture.width,
        texture.height,
        texture.size_bytes() as f32 / 1024.0
    );

    Ok(texture)
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);

        let sample = tex.sample(0.5, 0.5);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 0.5).abs() < 0.001);
        assert!((sample.z - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_bilinear_sample() {
        // Left column black, right column white
        let pixels = vec![
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 1.0],
        ];
        let tex = Texture::new(2, 2, pixels, "test").unwrap();

        assert!((tex.sample(0.0, 0.5).x - 0.0).abs() < 0.001);
        assert!((tex.sample(0.5, 0.5).x - 0.5).abs() < 0.001);
        assert!((tex.sample(1.0, 0.5).x - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_sample_v_is_flipped() {
        // Top row red, bottom row blue
        let pixels = vec![[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]];
        let tex = Texture::new(1, 2, pixels, "test").unwrap();

        assert!((tex.sample(0.5, 1.0).x - 1.0).abs() < 0.001);
        assert!((tex.sample(0.5, 0.0).z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_texture_rejects_empty() {
        assert!(Texture::new(0, 4, Vec::new(), "empty").is_err());
    }

    #[test]
    fn test_texture_rejects_size_mismatch() {
        assert!(Texture::new(2, 2, vec![[0.0; 4]; 3], "short").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = load_texture_file(Path::new("does/not/exist.png"));
        assert!(matches!(result, Err(TextureError::ImageError(_))));
    }

    #[test]
    fn test_srgb_to_linear() {
        // Black stays black
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);

        // White stays white
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
