//! Per-render settings read by the tracer and the camera.

use glint_math::Vec3;
use serde::Deserialize;

use crate::scene::{SceneError, SceneResult};

/// How shadow rays decide whether an occluder sits between a point and a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMode {
    /// Shadow ray direction is the unnormalized vector to the light and any
    /// hit with `t <= 1` blocks. Approximate: the start point is nudged
    /// toward the light, so `t = 1` lands slightly past it.
    Parametric,
    /// Unit shadow ray direction; a hit blocks only if it is closer than the light.
    #[default]
    Distance,
}

/// Settings that change what a traced ray returns.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceSettings {
    /// Maximum reflection bounces per primary ray (0 disables reflections)
    pub bounce_limit: u32,
    /// Shadow ray visibility test
    pub shadow_mode: ShadowMode,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            bounce_limit: 4,
            shadow_mode: ShadowMode::Distance,
        }
    }
}

impl TraceSettings {
    pub fn with_bounce_limit(mut self, bounce_limit: u32) -> Self {
        self.bounce_limit = bounce_limit;
        self
    }

    pub fn with_shadow_mode(mut self, shadow_mode: ShadowMode) -> Self {
        self.shadow_mode = shadow_mode;
        self
    }
}

/// Pinhole camera placement and image size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
        }
    }
}

impl CameraSettings {
    /// Check the settings describe a usable camera.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.look_from.is_finite() {
            return Err(SceneError::NonFinite("camera look_from"));
        }
        if !self.look_at.is_finite() {
            return Err(SceneError::NonFinite("camera look_at"));
        }
        if !self.vup.is_finite() {
            return Err(SceneError::NonFinite("camera vup"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "image size {}x{} is empty",
                self.width, self.height
            )));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "vertical fov {} is outside (0, 180)",
                self.vfov
            )));
        }
        let forward = self.look_at - self.look_from;
        if forward.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "look_from and look_at coincide".to_string(),
            ));
        }
        if forward.cross(self.vup).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera(
                "vup is parallel to the view direction".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_settings_default() {
        let settings = TraceSettings::default();
        assert_eq!(settings.bounce_limit, 4);
        assert_eq!(settings.shadow_mode, ShadowMode::Distance);
    }

    #[test]
    fn test_trace_settings_from_json() {
        let settings: TraceSettings =
            serde_json::from_str(r#"{ "bounce_limit": 0, "shadow_mode": "parametric" }"#).unwrap();
        assert_eq!(settings.bounce_limit, 0);
        assert_eq!(settings.shadow_mode, ShadowMode::Parametric);
    }

    #[test]
    fn test_negative_bounce_limit_rejected() {
        let result: Result<TraceSettings, _> = serde_json::from_str(r#"{ "bounce_limit": -1 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_camera_settings_partial_json() {
        let camera: CameraSettings =
            serde_json::from_str(r#"{ "width": 64, "look_from": [0, 1, 5] }"#).unwrap();
        assert_eq!(camera.width, 64);
        assert_eq!(camera.height, 450);
        assert_eq!(camera.look_from, Vec3::new(0.0, 1.0, 5.0));
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn test_camera_settings_validate() {
        let empty = CameraSettings {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(empty.validate(), Err(SceneError::InvalidCamera(_))));

        let degenerate = CameraSettings {
            look_at: Vec3::ZERO,
            ..Default::default()
        };
        assert!(degenerate.validate().is_err());

        let parallel_up = CameraSettings {
            vup: Vec3::NEG_Z,
            ..Default::default()
        };
        assert!(parallel_up.validate().is_err());
    }

    #[test]
    fn test_camera_settings_reject_non_finite() {
        let nan_eye = CameraSettings {
            look_from: Vec3::new(f32::NAN, 0.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(nan_eye.validate(), Err(SceneError::NonFinite(_))));

        let infinite_target = CameraSettings {
            look_at: Vec3::new(0.0, 0.0, f32::NEG_INFINITY),
            ..Default::default()
        };
        assert!(matches!(infinite_target.validate(), Err(SceneError::NonFinite(_))));

        let nan_up = CameraSettings {
            vup: Vec3::new(0.0, f32::NAN, 0.0),
            ..Default::default()
        };
        assert!(matches!(nan_up.validate(), Err(SceneError::NonFinite(_))));
    }
}
