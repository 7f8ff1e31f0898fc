//! Backgrounds seen by rays that leave the scene.

use std::path::Path;

use glint_math::Vec3;

use crate::material::Color;
use crate::texture::{load_texture_file, Texture, TextureResult};

/// A direction-indexed color source.
///
/// Implementations must return a defined color for every direction,
/// including the zero vector.
pub trait Environment: Send + Sync {
    /// Color seen looking along `direction` (not necessarily normalized).
    fn sample(&self, direction: Vec3) -> Color;
}

/// The same color in every direction.
#[derive(Debug, Clone, Copy)]
pub struct UniformEnvironment {
    color: Color,
}

impl UniformEnvironment {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Environment for UniformEnvironment {
    fn sample(&self, _direction: Vec3) -> Color {
        self.color
    }
}

/// Vertical blend from `horizon` (looking down) to `zenith` (looking up).
#[derive(Debug, Clone, Copy)]
pub struct GradientEnvironment {
    horizon: Color,
    zenith: Color,
}

impl GradientEnvironment {
    pub fn new(horizon: Color, zenith: Color) -> Self {
        Self { horizon, zenith }
    }

    /// White to light blue, the usual sky.
    pub fn sky() -> Self {
        Self::new(Color::ONE, Color::new(0.5, 0.7, 1.0))
    }
}

impl Environment for GradientEnvironment {
    fn sample(&self, direction: Vec3) -> Color {
        let unit_direction = direction.normalize_or_zero();
        let a = 0.5 * (unit_direction.y + 1.0);
        self.horizon * (1.0 - a) + self.zenith * a
    }
}

/// Cube face order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_COUNT: usize = 6;

/// Six-face cube map using the OpenGL face layout.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Texture; CUBE_FACE_COUNT],
    z_up: bool,
}

impl CubeMap {
    /// Create a cube map from faces in +X, -X, +Y, -Y, +Z, -Z order.
    pub fn new(faces: [Texture; CUBE_FACE_COUNT]) -> Self {
        Self { faces, z_up: false }
    }

    /// Look up with Y and Z swapped, for maps authored with Z as up.
    pub fn with_z_up(mut self, z_up: bool) -> Self {
        self.z_up = z_up;
        self
    }

    /// Load six face images.
    pub fn load<P: AsRef<Path>>(paths: &[P; CUBE_FACE_COUNT]) -> TextureResult<Self> {
        let [px, nx, py, ny, pz, nz] = paths;
        let faces = [
            load_texture_file(px.as_ref())?,
            load_texture_file(nx.as_ref())?,
            load_texture_file(py.as_ref())?,
            load_texture_file(ny.as_ref())?,
            load_texture_file(pz.as_ref())?,
            load_texture_file(nz.as_ref())?,
        ];
        log::info!(
            "Loaded cube map ({}x{} faces)",
            faces[0].width,
            faces[0].height
        );
        Ok(Self::new(faces))
    }

    /// Pick the face and its (s, t) coordinates for a direction.
    ///
    /// `t` grows downward on the face image, as in OpenGL cube maps.
    fn face_coords(d: Vec3) -> (usize, f32, f32) {
        let a = d.abs();
        let (face, sc, tc, ma) = if a.x >= a.y && a.x >= a.z {
            if d.x > 0.0 {
                (0, -d.z, -d.y, a.x)
            } else {
                (1, d.z, -d.y, a.x)
            }
        } else if a.y >= a.z {
            if d.y > 0.0 {
                (2, d.x, d.z, a.y)
            } else {
                (3, d.x, -d.z, a.y)
            }
        } else if d.z > 0.0 {
            (4, d.x, -d.y, a.z)
        } else {
            (5, -d.x, -d.y, a.z)
        };

        let s = 0.5 * (sc / ma + 1.0);
        let t = 0.5 * (tc / ma + 1.0);
        (face, s, t)
    }
}

impl Environment for CubeMap {
    fn sample(&self, direction: Vec3) -> Color {
        if direction.length_squared() == 0.0 || !direction.is_finite() {
            return Color::ZERO;
        }
        let d = if self.z_up {
            Vec3::new(direction.x, direction.z, direction.y)
        } else {
            direction
        };

        let (face, s, t) = Self::face_coords(d);
        self.faces[face].sample(s, 1.0 - t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_faces() -> [Texture; CUBE_FACE_COUNT] {
        [
            Texture::solid_color(Color::new(1.0, 0.0, 0.0)),
            Texture::solid_color(Color::new(0.5, 0.0, 0.0)),
            Texture::solid_color(Color::new(0.0, 1.0, 0.0)),
            Texture::solid_color(Color::new(0.0, 0.5, 0.0)),
            Texture::solid_color(Color::new(0.0, 0.0, 1.0)),
            Texture::solid_color(Color::new(0.0, 0.0, 0.5)),
        ]
    }

    #[test]
    fn test_uniform_environment() {
        let env = UniformEnvironment::new(Color::new(0.1, 0.2, 0.3));
        assert_eq!(env.sample(Vec3::X), Color::new(0.1, 0.2, 0.3));
        assert_eq!(env.sample(Vec3::ZERO), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_gradient_endpoints() {
        let env = GradientEnvironment::sky();

        let up = env.sample(Vec3::new(0.0, 3.0, 0.0));
        let down = env.sample(Vec3::NEG_Y);
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 0.001);
        assert!((down - Color::ONE).length() < 0.001);
        assert!(up.x < down.x);
    }

    #[test]
    fn test_cube_map_face_selection() {
        let env = CubeMap::new(solid_faces());

        assert_eq!(env.sample(Vec3::X), Color::new(1.0, 0.0, 0.0));
        assert_eq!(env.sample(Vec3::NEG_X), Color::new(0.5, 0.0, 0.0));
        assert_eq!(env.sample(Vec3::Y * 2.0), Color::new(0.0, 1.0, 0.0));
        assert_eq!(env.sample(Vec3::NEG_Y), Color::new(0.0, 0.5, 0.0));
        assert_eq!(env.sample(Vec3::new(0.1, 0.2, 0.9)), Color::new(0.0, 0.0, 1.0));
        assert_eq!(env.sample(Vec3::NEG_Z), Color::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_cube_map_z_up() {
        let env = CubeMap::new(solid_faces()).with_z_up(true);

        // +Z in the scene looks at the +Y face
        assert_eq!(env.sample(Vec3::Z), Color::new(0.0, 1.0, 0.0));
        assert_eq!(env.sample(Vec3::Y), Color::new(0.0, 0.0, 1.0));
        assert_eq!(env.sample(Vec3::X), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_cube_map_zero_direction() {
        let env = CubeMap::new(solid_faces());
        assert_eq!(env.sample(Vec3::ZERO), Color::ZERO);
    }

    #[test]
    fn test_face_coords_center() {
        let (face, s, t) = CubeMap::face_coords(Vec3::NEG_Z);
        assert_eq!(face, 5);
        assert!((s - 0.5).abs() < 0.001);
        assert!((t - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_face_coords_orientation() {
        // On +Z, +X maps to the right and +Y to the top of the face
        let (face, s, t) = CubeMap::face_coords(Vec3::new(0.5, 0.5, 1.0));
        assert_eq!(face, 4);
        assert!((s - 0.75).abs() < 0.001);
        assert!((t - 0.25).abs() < 0.001);
    }
}
