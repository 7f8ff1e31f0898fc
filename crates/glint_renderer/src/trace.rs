//! Primary ray tracing with bounded mirror reflections.
//!
//! Reflections are followed with an explicit loop rather than recursion, so
//! the work per ray is capped at `MAX_BOUNCES` secondary rays no matter what
//! bounce limit the scene asks for.

use glint_core::{Color, Scene, TraceSettings};
use glint_math::{Ray, Vec3, Vec4};

use crate::hittable::{intersect, HitInfo};
use crate::shade::shade;

/// Hard cap on reflection bounces per primary ray.
pub const MAX_BOUNCES: u32 = 16;

/// Distance a reflection ray starts away from the surface it leaves.
pub const REFLECTION_EPSILON: f32 = 0.001;

/// Lowest per-channel reflectance carried into the next bounce.
pub const MIN_REFLECTANCE: f32 = 0.01;

/// Color seen along `ray`, with alpha fixed at 1.
///
/// A hit is shaded locally and then mirrored reflections are added on top.
/// A miss returns the environment along the ray direction.
pub fn trace(ray: &Ray, scene: &Scene, settings: &TraceSettings) -> Vec4 {
    let color = match intersect(ray, scene) {
        Some(hit) => {
            let view = (-ray.direction()).normalize_or_zero();
            let local = shade(scene, &hit.material, hit.position, hit.normal, view, settings);
            local + reflect_bounces(scene, &hit, view, settings)
        }
        None => scene.environment_color(ray.direction()),
    };

    color.extend(1.0)
}

/// Reflected light arriving at `hit`, seen from direction `view`.
///
/// Each bounce is weighted by the product of the specular coefficients
/// along the path so far. The loop stops early when the weight is zero or a
/// reflection ray escapes to the environment.
pub fn reflect_bounces(
    scene: &Scene,
    hit: &HitInfo,
    view: Vec3,
    settings: &TraceSettings,
) -> Color {
    if !hit.material.is_reflective() {
        return Color::ZERO;
    }
    let bounces = settings.bounce_limit.min(MAX_BOUNCES);

    let mut color = Color::ZERO;
    let mut hit = *hit;
    let mut view = view;
    let mut weight = hit.material.k_s;

    // `attenuate` keeps the weight positive once the first bounce is taken
    for _ in 0..bounces {
        let direction = reflect(-view, hit.normal);
        let ray = Ray::offset(hit.position, direction, REFLECTION_EPSILON);

        match intersect(&ray, scene) {
            Some(next) => {
                let next_view = (-direction).normalize_or_zero();
                color += weight
                    * shade(scene, &next.material, next.position, next.normal, next_view, settings);

                weight = attenuate(weight, next.material.k_s);
                hit = next;
                view = next_view;
            }
            None => {
                color += weight * scene.environment_color(direction);
                break;
            }
        }
    }

    color
}

/// Weight for the bounce after hitting a surface with specular `k_s`.
///
/// Floored per channel at `MIN_REFLECTANCE`, so deep bounces fade but never
/// drop out entirely. This trades energy conservation for visible
/// inter-reflections.
#[inline]
pub fn attenuate(weight: Color, k_s: Color) -> Color {
    (weight * k_s).max(Color::splat(MIN_REFLECTANCE))
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
