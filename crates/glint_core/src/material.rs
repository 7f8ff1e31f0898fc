//! Surface material for Blinn-Phong shading.

use glint_math::Vec3;

use crate::scene::{SceneError, SceneResult};

/// Color type alias (linear RGB, unclamped)
pub type Color = Vec3;

/// Blinn-Phong material coefficients.
///
/// Copied into every hit record, so it stays small and `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse coefficient
    pub k_d: Color,
    /// Specular coefficient, also the mirror reflectance
    pub k_s: Color,
    /// Specular exponent
    pub n: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            k_d: Color::splat(0.5),
            k_s: Color::ZERO,
            n: 1.0,
        }
    }
}

impl Material {
    /// Create a validated material.
    ///
    /// The exponent must be finite and non-negative and both coefficients finite.
    pub fn new(k_d: Color, k_s: Color, n: f32) -> SceneResult<Self> {
        if !k_d.is_finite() {
            return Err(SceneError::NonFinite("diffuse coefficient"));
        }
        if !k_s.is_finite() {
            return Err(SceneError::NonFinite("specular coefficient"));
        }
        if !n.is_finite() || n < 0.0 {
            return Err(SceneError::InvalidExponent(n));
        }
        Ok(Self { k_d, k_s, n })
    }

    /// A purely diffuse material.
    pub fn diffuse(k_d: Color) -> Self {
        Self {
            k_d,
            ..Default::default()
        }
    }

    /// True if this material spawns reflection rays.
    pub fn is_reflective(&self) -> bool {
        self.k_s.element_sum() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_new() {
        let mtl = Material::new(Color::new(0.5, 0.1, 0.1), Color::splat(0.2), 32.0).unwrap();
        assert_eq!(mtl.n, 32.0);
        assert!(mtl.is_reflective());
    }

    #[test]
    fn test_material_rejects_negative_exponent() {
        let err = Material::new(Color::ONE, Color::ZERO, -1.0).unwrap_err();
        assert!(matches!(err, SceneError::InvalidExponent(_)));
    }

    #[test]
    fn test_material_rejects_nan_coefficients() {
        let err = Material::new(Color::new(f32::NAN, 0.0, 0.0), Color::ZERO, 1.0).unwrap_err();
        assert!(matches!(err, SceneError::NonFinite(_)));
    }

    #[test]
    fn test_zero_exponent_is_allowed() {
        assert!(Material::new(Color::ONE, Color::ONE, 0.0).is_ok());
    }

    #[test]
    fn test_diffuse_is_not_reflective() {
        assert!(!Material::diffuse(Color::ONE).is_reflective());
    }
}
