//! Local Blinn-Phong shading with shadow rays.

use glint_core::{Color, Material, Scene, ShadowMode, TraceSettings};
use glint_math::{Ray, Vec3};

use crate::hittable::intersect;

/// Distance a shadow ray starts away from the surface it leaves.
pub const SHADOW_EPSILON: f32 = 0.001;

/// Direct lighting at a surface point from every light in the scene.
///
/// `normal` and `view` are unit vectors, `view` pointing from the surface
/// back toward the viewer. There is no ambient term and the result is not
/// clamped.
pub fn shade(
    scene: &Scene,
    material: &Material,
    position: Vec3,
    normal: Vec3,
    view: Vec3,
    settings: &TraceSettings,
) -> Color {
    let mut color = Color::ZERO;

    for light in scene.lights() {
        // A light sitting on the surface has no direction
        let Some(l) = (light.position - position).try_normalize() else {
            continue;
        };

        if !light_visible(scene, position, light.position, settings.shadow_mode) {
            continue;
        }

        let h = (l + view).normalize_or_zero();
        let diffuse = normal.dot(l).max(0.0);
        let specular = normal.dot(h).max(0.0).powf(material.n);

        color += (material.k_d * diffuse + material.k_s * specular) * light.intensity;
    }

    color
}

/// True if nothing blocks the path from `position` to `light_position`.
pub fn light_visible(
    scene: &Scene,
    position: Vec3,
    light_position: Vec3,
    mode: ShadowMode,
) -> bool {
    let to_light = light_position - position;
    let Some(l) = to_light.try_normalize() else {
        return true;
    };
    let origin = position + l * SHADOW_EPSILON;

    match mode {
        ShadowMode::Parametric => {
            let ray = Ray::new(origin, to_light);
            intersect(&ray, scene).map_or(true, |hit| hit.t > 1.0)
        }
        ShadowMode::Distance => {
            let distance = (light_position - origin).length();
            let ray = Ray::new(origin, l);
            intersect(&ray, scene).map_or(true, |hit| hit.t > distance)
        }
    }
}
