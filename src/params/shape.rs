//! Sphere geometry parameters and audio-reactive shape mapping.

use serde::Deserialize;

/// Upper bound on segments in either direction (keeps buffers and u32 indices in range)
pub const MAX_SEGMENTS: usize = 1024;

/// Per-vertex deformation style applied while speaking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Deformation {
    /// Single interference pattern whose depth follows the level
    #[default]
    Ripple,
    /// Slow base wobble plus a fast audio wave layered on top
    Layered,
}

/// Surface coloring style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Whole-surface recolor from cyan toward orange with rising emission
    #[default]
    Material,
    /// Dark body with a hue-cycling edge halo
    Rim,
}

/// Sphere geometry and the mapping from boosted level to shape
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeParams {
    /// Base sphere radius (world units)
    pub radius: f32,

    /// Longitudinal segments (vertices per ring = segments + 1)
    pub segments_width: usize,

    /// Latitudinal segments (rings = segments + 1)
    pub segments_height: usize,

    /// Scale with no sound
    pub idle_scale: f32,

    /// Scale while speaking at zero level (before gain)
    pub speak_scale: f32,

    /// Extra speaking scale per unit of boosted level
    /// Formula: scale = idle * (1 - b) + (speak + b * gain) * b
    pub speak_scale_gain: f32,

    /// Base rotation around X (radians per frame)
    pub rotation_x_base: f32,

    /// Extra X rotation per unit of boosted level (radians per frame)
    pub rotation_x_gain: f32,

    /// Base rotation around Y (radians per frame)
    pub rotation_y_base: f32,

    /// Extra Y rotation per unit of boosted level (radians per frame)
    pub rotation_y_gain: f32,

    /// Deformation style
    pub deformation: Deformation,

    /// Coloring style
    pub color_mode: ColorMode,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            radius: 2.0,
            segments_width: 128,
            segments_height: 128,
            idle_scale: 1.0,
            speak_scale: 1.0,
            speak_scale_gain: 2.0,
            rotation_x_base: 0.002, // Very slow drift at rest
            rotation_x_gain: 0.04,
            rotation_y_base: 0.005,
            rotation_y_gain: 0.08,
            deformation: Deformation::Ripple,
            color_mode: ColorMode::Material,
        }
    }
}

impl ShapeParams {
    /// Validate geometry (enough segments to close a sphere, positive radius)
    pub fn validate(&self) -> Result<(), String> {
        if !(3..=MAX_SEGMENTS).contains(&self.segments_width) {
            return Err(format!(
                "Width segments must be in [3, {}], got {}",
                MAX_SEGMENTS, self.segments_width
            ));
        }
        if !(2..=MAX_SEGMENTS).contains(&self.segments_height) {
            return Err(format!(
                "Height segments must be in [2, {}], got {}",
                MAX_SEGMENTS, self.segments_height
            ));
        }
        if !(self.radius > 0.0) {
            return Err(format!("Radius must be > 0, got {}", self.radius));
        }
        Ok(())
    }
}
