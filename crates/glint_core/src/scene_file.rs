//! JSON scene files.
//!
//! ```json
//! {
//!   "camera": { "width": 640, "height": 360, "look_from": [0, 1, 6] },
//!   "trace": { "bounce_limit": 4, "shadow_mode": "distance" },
//!   "materials": {
//!     "mirror": { "diffuse": [0.1, 0.1, 0.1], "specular": [0.9, 0.9, 0.9], "exponent": 200 }
//!   },
//!   "spheres": [ { "center": [0, 0, 0], "radius": 1, "material": "mirror" } ],
//!   "lights": [ { "position": [4, 6, 4], "intensity": [1, 1, 1] } ],
//!   "environment": { "type": "gradient", "horizon": [1, 1, 1], "zenith": [0.5, 0.7, 1] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_math::Vec3;
use serde::Deserialize;

use crate::environment::{
    CubeMap, Environment, GradientEnvironment, UniformEnvironment, CUBE_FACE_COUNT,
};
use crate::material::{Color, Material};
use crate::scene::{Light, Scene, SceneError, SceneResult, Sphere};
use crate::settings::{CameraSettings, TraceSettings};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDesc {
    pub diffuse: Color,
    #[serde(default)]
    pub specular: Color,
    #[serde(default = "default_exponent")]
    pub exponent: f32,
}

fn default_exponent() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDesc {
    pub position: Vec3,
    pub intensity: Color,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvironmentDesc {
    Uniform {
        color: Color,
    },
    Gradient {
        horizon: Color,
        zenith: Color,
    },
    CubeMap {
        /// Face images in +X, -X, +Y, -Y, +Z, -Z order
        faces: [PathBuf; CUBE_FACE_COUNT],
        #[serde(default)]
        z_up: bool,
    },
}

impl Default for EnvironmentDesc {
    fn default() -> Self {
        EnvironmentDesc::Uniform { color: Color::ZERO }
    }
}

impl EnvironmentDesc {
    /// Build the environment, resolving relative image paths against `base_dir`.
    fn build(&self, base_dir: &Path) -> SceneResult<Arc<dyn Environment>> {
        Ok(match self {
            EnvironmentDesc::Uniform { color } => Arc::new(UniformEnvironment::new(*color)),
            EnvironmentDesc::Gradient { horizon, zenith } => {
                Arc::new(GradientEnvironment::new(*horizon, *zenith))
            }
            EnvironmentDesc::CubeMap { faces, z_up } => {
                let paths = faces.clone().map(|face| resolve_path(base_dir, &face));
                Arc::new(CubeMap::load(&paths)?.with_z_up(*z_up))
            }
        })
    }
}

/// On-disk scene description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneFile {
    pub camera: CameraSettings,
    pub trace: TraceSettings,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
    pub lights: Vec<LightDesc>,
    pub environment: EnvironmentDesc,
}

/// A validated scene together with the settings it was saved with.
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub scene: Scene,
    pub camera: CameraSettings,
    pub trace: TraceSettings,
}

impl SceneFile {
    /// Validate the description and build the scene.
    pub fn build(&self, base_dir: &Path) -> SceneResult<LoadedScene> {
        self.camera.validate()?;

        let mut materials = BTreeMap::new();
        for (name, desc) in &self.materials {
            let material = Material::new(desc.diffuse, desc.specular, desc.exponent)?;
            materials.insert(name.as_str(), material);
        }

        let mut scene = Scene::new(self.environment.build(base_dir)?);

        for desc in &self.spheres {
            let material = materials
                .get(desc.material.as_str())
                .copied()
                .ok_or_else(|| SceneError::UnknownMaterial(desc.material.clone()))?;
            scene.add_sphere(Sphere::new(desc.center, desc.radius, material)?);
        }

        for desc in &self.lights {
            scene.add_light(Light::new(desc.position, desc.intensity)?);
        }

        Ok(LoadedScene {
            scene,
            camera: self.camera,
            trace: self.trace,
        })
    }
}

/// Parse and build a scene from a JSON string.
pub fn load_scene_from_str(source: &str, base_dir: &Path) -> SceneResult<LoadedScene> {
    let file: SceneFile = serde_json::from_str(source)?;
    file.build(base_dir)
}

/// Load a scene file from disk.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<LoadedScene> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let loaded = load_scene_from_str(&source, base_dir)?;

    log::info!(
        "Loaded scene {}: {} spheres, {} lights",
        path.display(),
        loaded.scene.sphere_count(),
        loaded.scene.light_count()
    );

    Ok(loaded)
}

/// Resolve a path relative to the scene file's directory.
fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
