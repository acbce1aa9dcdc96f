//! Window, camera, lighting and material configuration.

use serde::Deserialize;

/// Point light and ambient term
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightParams {
    /// Point light position (world units)
    pub position: [f32; 3],

    /// Point light color (linear RGB)
    pub color: [f32; 3],

    /// Point light intensity multiplier
    pub intensity: f32,

    /// Distance at which the point light fades to zero (world units)
    pub range: f32,

    /// Ambient light color (linear RGB)
    pub ambient: [f32; 3],
}

impl Default for LightParams {
    fn default() -> Self {
        let ambient = 0x20 as f32 / 255.0;
        Self {
            position: [8.0, 8.0, 8.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.8,
            range: 100.0,
            ambient: [ambient; 3],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Camera position; it always looks at the origin
    pub camera_position: [f32; 3],

    /// MSAA sample count (1 disables multisampling)
    pub msaa_samples: u32,

    /// Metalness of the sphere material, in [0, 1]
    pub metalness: f32,

    /// Roughness of the sphere material, in [0, 1]
    pub roughness: f32,

    /// Body color used by rim shading (linear RGB)
    pub rim_base_color: [f32; 3],

    pub light: LightParams,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane: 0.1,
            far_plane: 100.0,
            camera_position: [0.0, 0.0, 8.0],
            msaa_samples: 4,
            metalness: 0.9,
            roughness: 0.15,
            rim_base_color: [0.02, 0.02, 0.05],
            light: LightParams::default(),
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}
