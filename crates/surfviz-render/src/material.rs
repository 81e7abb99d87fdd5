use serde::{Deserialize, Serialize};
use surfviz_core::Result;
use surfviz_math::{parse_hex_color, Rgb};

use crate::settings::{check_unit_interval, ViewerSettings};

/// Material parameters for the two draw passes.
///
/// The surface pass is double-sided, textured with the grid and slightly
/// transparent; the wireframe pass is an unlit line overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialSettings {
    pub color: Rgb,
    pub wireframe: bool,
    pub wireframe_color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub wireframe_opacity: f32,
}

impl MaterialSettings {
    pub const SURFACE_OPACITY: f32 = 0.9;
    pub const WIREFRAME_OPACITY: f32 = 0.1;

    /// Material for a surface of `color` under the current settings.
    pub fn from_settings(color: Rgb, settings: &ViewerSettings) -> Result<Self> {
        check_unit_interval("metalness", settings.metalness)?;
        check_unit_interval("roughness", settings.roughness)?;
        Ok(Self {
            color,
            wireframe: settings.wireframe,
            wireframe_color: parse_hex_color(&settings.wireframe_color)?,
            metalness: settings.metalness as f32,
            roughness: settings.roughness as f32,
            opacity: Self::SURFACE_OPACITY,
            wireframe_opacity: Self::WIREFRAME_OPACITY,
        })
    }
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            color: [0x44 as f32 / 255.0, 0x88 as f32 / 255.0, 1.0],
            wireframe: true,
            wireframe_color: [0.0, 0.0, 0.0],
            metalness: 0.5,
            roughness: 0.5,
            opacity: Self::SURFACE_OPACITY,
            wireframe_opacity: Self::WIREFRAME_OPACITY,
        }
    }
}
