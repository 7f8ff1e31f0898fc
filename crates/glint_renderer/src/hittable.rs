//! Hittable trait and HitInfo for ray-sphere intersection.

use glint_core::{Material, Scene, Sphere};
use glint_math::{Interval, Ray, Vec3};

/// Starting "no hit yet" distance for nearest-hit searches.
pub const NO_HIT_T: f32 = 1e30;

/// Record of a ray-sphere intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Parameter t where the intersection occurs, in units of the ray direction
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit outward surface normal
    pub normal: Vec3,
    /// Material of the sphere that was hit
    pub material: Material,
}

/// Trait for things that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest hit with `t` strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo>;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo> {
        // Solve along the unit direction so very short or very long direction
        // vectors do not underflow or overflow `dir·dir`; roots are rescaled
        // back to units of the ray direction afterwards.
        let direction = ray.direction();
        let scale = direction.abs().max_element();
        if !(scale > 0.0 && scale.is_finite()) {
            return None;
        }
        let scaled = direction / scale;
        let length = scale * scaled.length();
        let unit = scaled.normalize();

        let oc = ray.origin() - self.center;
        let b = 2.0 * oc.dot(unit);
        let c = oc.length_squared() - self.radius * self.radius;

        // Tangent rays count as misses
        let discriminant = b * b - 4.0 * c;
        if !(discriminant > 0.0) {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Smallest root inside the range; the far root covers rays starting inside
        let mut distance = (-b - sqrtd) / 2.0;
        if !ray_t.surrounds(distance / length) {
            distance = (-b + sqrtd) / 2.0;
            if !ray_t.surrounds(distance / length) {
                return None;
            }
        }

        let position = ray.origin() + distance * unit;
        Some(HitInfo {
            t: distance / length,
            position,
            normal: (position - self.center).normalize_or_zero(),
            material: self.material,
        })
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitInfo> {
        let mut closest_so_far = ray_t.max;
        let mut nearest = None;

        for sphere in self.spheres() {
            if let Some(hit) = sphere.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                nearest = Some(hit);
            }
        }

        nearest
    }
}

/// Nearest sphere hit in front of the ray origin.
///
/// Roots at or behind the origin are ignored, so a ray starting on a
/// surface does not report that surface.
#[inline]
pub fn intersect(ray: &Ray, scene: &Scene) -> Option<HitInfo> {
    scene.hit(ray, Interval::new(0.0, NO_HIT_T))
}
