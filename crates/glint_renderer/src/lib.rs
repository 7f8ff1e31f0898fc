//! Glint Renderer - CPU Whitted-style ray tracing.
//!
//! Spheres are tested by brute force, shaded with Blinn-Phong and shadow
//! rays, and mirrored reflections are followed for a bounded number of
//! bounces before falling back to the scene's environment.

mod bucket;
mod camera;
mod hittable;
mod renderer;
mod shade;
mod trace;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{intersect, HitInfo, Hittable, NO_HIT_T};
pub use renderer::{color_to_rgba, render, render_pixel, ImageBuffer};
pub use shade::{light_visible, shade, SHADOW_EPSILON};
pub use trace::{
    attenuate, reflect, reflect_bounces, trace, MAX_BOUNCES, MIN_REFLECTANCE, REFLECTION_EPSILON,
};

/// Re-export common types from glint_math and glint_core
pub use glint_core::{Color, Scene, TraceSettings};
pub use glint_math::{Interval, Ray, Vec3, Vec4};
