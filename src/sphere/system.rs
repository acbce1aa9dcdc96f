//! High-level sphere system: one estimate-then-shape step per frame.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use super::color::{material_color, rim_glow, Shading};
use super::mesh::SphereMesh;
use super::shape::ShapeDriver;
use crate::level::{LevelEstimator, LevelReading};
use crate::params::{ColorMode, LevelParams, ShapeParams};

/// Everything the renderer needs from one frame besides the vertices
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput {
    pub level: LevelReading,
    pub scale: f32,
    /// Accumulated rotation after this frame (x, y radians)
    pub rotation: Vec2,
    pub shading: Shading,
}

impl FrameOutput {
    /// Model matrix: uniform scale, then X-Y rotation
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, Vec3::ZERO)
    }
}

/// Audio-reactive sphere: level estimator, shape driver and mesh
pub struct SphereSystem {
    pub mesh: SphereMesh,
    estimator: LevelEstimator,
    driver: ShapeDriver,
}

impl SphereSystem {
    /// Create new sphere system with specified parameters
    pub fn new(level: LevelParams, shape: ShapeParams) -> Self {
        let mesh = SphereMesh::new(&shape);
        Self {
            mesh,
            estimator: LevelEstimator::new(level),
            driver: ShapeDriver::new(shape),
        }
    }

    pub fn estimator(&self) -> &LevelEstimator {
        &self.estimator
    }

    pub fn driver(&self) -> &ShapeDriver {
        &self.driver
    }

    /// Advance one animation frame
    ///
    /// # Arguments
    /// * `bins` - Current frequency snapshot, `None` when no audio source is available
    /// * `time_s` - Elapsed time in seconds
    ///
    /// # Returns
    /// * Per-frame scale, rotation and shading; `self.mesh` holds the new vertices
    pub fn update(&mut self, bins: Option<&[u8]>, time_s: f32) -> FrameOutput {
        let level = self.estimator.update(bins);
        let boosted = level.boosted;

        let deformation = self.driver.params().deformation;
        if boosted == 0.0 {
            self.mesh.reset();
        } else {
            self.mesh
                .deform(|base| deformation.displacement(base, time_s, boosted));
        }

        let scale = self.driver.scale(boosted);
        let rotation = self.driver.advance_rotation(boosted);

        let shading = match self.driver.params().color_mode {
            ColorMode::Material => Shading::Material(material_color(boosted)),
            ColorMode::Rim => Shading::Rim(rim_glow(time_s, boosted)),
        };

        FrameOutput {
            level,
            scale,
            rotation,
            shading,
        }
    }
}
