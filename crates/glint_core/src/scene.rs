//! Scene types for Glint.
//!
//! A `Scene` is built once by the host and then shared read-only by every
//! ray. Validation happens here so the tracing path never has to fail.

use std::sync::Arc;

use glint_math::Vec3;
use thiserror::Error;

use crate::environment::{Environment, UniformEnvironment};
use crate::material::{Color, Material};
use crate::texture::TextureError;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Sphere radius must be finite and non-negative, got {0}")]
    InvalidRadius(f32),

    #[error("Specular exponent must be finite and non-negative, got {0}")]
    InvalidExponent(f32),

    #[error("Non-finite {0}")]
    NonFinite(&'static str),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Scene file parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere with a material attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere, rejecting negative or non-finite radii.
    pub fn new(center: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        if !center.is_finite() {
            return Err(SceneError::NonFinite("sphere center"));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> SceneResult<Self> {
        if !position.is_finite() {
            return Err(SceneError::NonFinite("light position"));
        }
        if !intensity.is_finite() {
            return Err(SceneError::NonFinite("light intensity"));
        }
        Ok(Self {
            position,
            intensity,
        })
    }
}

/// Everything a ray can see: spheres, point lights and the background.
#[derive(Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    environment: Arc<dyn Environment>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Arc::new(UniformEnvironment::new(Color::ZERO)))
    }
}

impl Scene {
    /// Create an empty scene with the given background.
    pub fn new(environment: Arc<dyn Environment>) -> Self {
        Self {
            spheres: Vec::new(),
            lights: Vec::new(),
            environment,
        }
    }

    /// Add a sphere. Sphere order does not affect which hit is nearest.
    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder form of `add_sphere`.
    pub fn with_sphere(mut self, sphere: Sphere) -> Self {
        self.add_sphere(sphere);
        self
    }

    /// Builder form of `add_light`.
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Replace the background.
    pub fn with_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Background color seen along `direction`.
    #[inline]
    pub fn environment_color(&self, direction: Vec3) -> Color {
        self.environment.sample(direction)
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("spheres", &self.spheres)
            .field("lights", &self.lights)
            .finish_non_exhaustive()
    }
}
