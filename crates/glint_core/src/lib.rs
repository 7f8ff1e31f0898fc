//! Glint Core - scene description for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Sphere`, `Light`, `Material`
//! - **Environments**: uniform, gradient and cube-map backgrounds
//! - **Scene files**: JSON scene loading with validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let loaded = load_scene("scenes/mirrors.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     loaded.scene.sphere_count(),
//!     loaded.scene.light_count());
//! ```

pub mod environment;
pub mod material;
pub mod scene;
pub mod scene_file;
pub mod settings;
pub mod texture;

// Re-export commonly used types
pub use environment::{CubeMap, Environment, GradientEnvironment, UniformEnvironment};
pub use material::{Color, Material};
pub use scene::{Light, Scene, SceneError, SceneResult, Sphere};
pub use scene_file::{load_scene, load_scene_from_str, LoadedScene, SceneFile};
pub use settings::{CameraSettings, ShadowMode, TraceSettings};
pub use texture::{Texture, TextureError, TextureResult};
