//! Whole-image rendering.
//!
//! Buckets are traced in parallel with rayon; every pixel is one primary ray
//! through its center. Colors stay unclamped until converted to 8-bit.

use std::time::Instant;

use glint_core::{Scene, TraceSettings};
use glint_math::{Interval, Vec4};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::trace::{trace, MAX_BOUNCES};

/// Render a single pixel.
#[inline]
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    settings: &TraceSettings,
) -> Vec4 {
    trace(&camera.get_ray(x, y), scene, settings)
}

/// Convert a color to 8-bit RGBA, clamping each channel to [0, 1].
pub fn color_to_rgba(color: Vec4) -> [u8; 4] {
    let to_byte = |c: f32| (255.0 * Interval::UNIT.clamp(c) + 0.5) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), to_byte(color.w)]
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::W; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Convert to an `image` buffer ready to be saved.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(color_to_rgba(self.get(x, y)))
        })
    }
}

/// Render the entire scene to an image buffer.
pub fn render(camera: &Camera, scene: &Scene, settings: &TraceSettings) -> ImageBuffer {
    if settings.bounce_limit > MAX_BOUNCES {
        log::warn!(
            "Bounce limit {} exceeds the maximum of {}, clamping",
            settings.bounce_limit,
            MAX_BOUNCES
        );
    }

    let width = camera.image_width;
    let height = camera.image_height;
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);

    log::info!(
        "Rendering {}x{} in {} buckets ({} spheres, {} lights, bounce limit {})",
        width,
        height,
        buckets.len(),
        scene.sphere_count(),
        scene.light_count(),
        settings.bounce_limit
    );

    let start = Instant::now();
    let results: Vec<_> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, settings))
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in results {
        let bucket = result.bucket;
        for (i, color) in result.pixels.into_iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{CameraSettings, Color, Light, Material, Sphere, UniformEnvironment};
    use glint_math::Vec3;
    use std::sync::Arc;

    fn test_scene() -> Scene {
        Scene::new(Arc::new(UniformEnvironment::new(Color::new(0.0, 0.0, 1.0))))
            .with_sphere(
                Sphere::new(Vec3::ZERO, 1.0, Material::diffuse(Color::new(1.0, 0.0, 0.0))).unwrap(),
            )
            .with_light(Light::new(Vec3::new(0.0, 0.0, 10.0), Color::ONE).unwrap())
    }

    fn test_camera(width: u32, height: u32) -> Camera {
        Camera::new(&CameraSettings {
            width,
            height,
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            ..Default::default()
        })
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Vec4::new(2.0, -1.0, 0.5, 1.0)), [255, 0, 128, 255]);
        assert_eq!(color_to_rgba(Vec4::new(0.0, 0.0, 0.0, 1.0)), [0, 0, 0, 255]);
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Vec4::ONE);
        assert_eq!(image.get(2, 1), Vec4::ONE);
        assert_eq!(image.get(0, 0), Vec4::W);
        assert_eq!(image.to_rgba8().len(), 3 * 2 * 4);

        let img = image.to_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_pixel_center_hits_sphere() {
        let scene = test_scene();
        let camera = test_camera(11, 11);

        let center = render_pixel(&camera, &scene, 5, 5, &TraceSettings::default());
        assert!(center.x > 0.9);
        assert_eq!(center.z, 0.0);

        let corner = render_pixel(&camera, &scene, 0, 0, &TraceSettings::default());
        assert_eq!(corner, Vec4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_render_matches_per_pixel_trace() {
        let scene = test_scene();
        let camera = test_camera(70, 40);
        let settings = TraceSettings::default();

        let image = render(&camera, &scene, &settings);
        assert_eq!(image.pixels.len(), 70 * 40);

        for (x, y) in [(0, 0), (35, 20), (69, 39), (33, 1), (40, 38)] {
            assert_eq!(image.get(x, y), render_pixel(&camera, &scene, x, y, &settings));
        }
    }
}
