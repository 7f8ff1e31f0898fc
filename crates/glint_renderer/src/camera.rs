//! Pinhole camera for primary ray generation.

use glint_core::CameraSettings;
use glint_math::{Ray, Vec3};

/// Camera for generating one primary ray per pixel.
#[derive(Debug, Clone)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Build a camera from validated settings.
    pub fn new(settings: &CameraSettings) -> Self {
        let image_width = settings.width.max(1);
        let image_height = settings.height.max(1);
        let center = settings.look_from;

        // Viewport one unit in front of the camera
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Camera basis vectors
        let w = (settings.look_from - settings.look_at).normalize_or_zero();
        let u = settings.vup.cross(w).normalize_or_zero();
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left = center - w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Ray through the center of pixel (i, j), row 0 at the top.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let pixel_center =
            self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v;
        Ray::new(self.center, pixel_center - self.center)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_camera() -> Camera {
        Camera::new(&CameraSettings {
            width: 101,
            height: 101,
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 90.0,
        })
    }

    #[test]
    fn test_center_ray_looks_at_target() {
        let camera = square_camera();
        let ray = camera.get_ray(50, 50);

        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 0.001);
    }

    #[test]
    fn test_image_orientation() {
        let camera = square_camera();

        // Row 0 is up, column 0 is left
        let top_left = camera.get_ray(0, 0).direction();
        assert!(top_left.x < 0.0);
        assert!(top_left.y > 0.0);

        let bottom_right = camera.get_ray(100, 100).direction();
        assert!(bottom_right.x > 0.0);
        assert!(bottom_right.y < 0.0);
    }

    #[test]
    fn test_field_of_view() {
        // 90 degree fov spans one unit each side at unit distance
        let camera = square_camera();
        let top = camera.get_ray(50, 0).direction();
        assert!((top.y - (1.0 - 1.0 / 101.0)).abs() < 0.001);
        assert!((top.z + 1.0).abs() < 0.001);
    }
}
