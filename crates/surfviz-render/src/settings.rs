//! User-tunable viewer settings, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use surfviz_core::{Result, SurfvizError};
use surfviz_math::parse_hex_color;
use surfviz_mesh::Resolution;

/// Everything the control panel exposes. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Grid subdivisions per axis
    pub segments: i64,
    /// Revolutions per second
    pub rotation_speed: f64,
    pub rotating: bool,
    pub wireframe: bool,
    pub wireframe_color: String,
    pub metalness: f64,
    pub roughness: f64,
    /// Grid texture repetitions across the UV square, per axis
    pub texture_repeat: u32,
}

impl ViewerSettings {
    /// Slider range of the rotation speed control.
    pub const ROTATION_SPEED_RANGE: (f64, f64) = (0.01, 0.5);

    pub fn validate(&self) -> Result<()> {
        Resolution::new(self.segments)?;
        check_unit_interval("metalness", self.metalness)?;
        check_unit_interval("roughness", self.roughness)?;
        if !self.rotation_speed.is_finite() || self.rotation_speed < 0.0 {
            return Err(SurfvizError::InvalidSetting(format!(
                "rotation_speed must be a non-negative number, got {}",
                self.rotation_speed
            )));
        }
        if self.texture_repeat == 0 {
            return Err(SurfvizError::InvalidSetting(
                "texture_repeat must be at least 1".to_string(),
            ));
        }
        parse_hex_color(&self.wireframe_color)?;
        Ok(())
    }

    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SurfvizError::Serialization(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SurfvizError::Serialization(e.to_string()))
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            segments: Resolution::DEFAULT_SEGMENTS as i64,
            rotation_speed: 0.1,
            rotating: true,
            wireframe: true,
            wireframe_color: "#000000".to_string(),
            metalness: 0.0,
            roughness: 0.0,
            texture_repeat: 4,
        }
    }
}

pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SurfvizError::InvalidSetting(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}
