//! Fixed perspective camera looking at the sphere.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Camera with a fixed eye position; only the aspect ratio changes
pub struct CameraSystem {
    eye: Vec3,
    target: Vec3,
    fov_radians: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl CameraSystem {
    /// Create new camera system from render configuration
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::from_array(config.camera_position),
            target: Vec3::ZERO,
            fov_radians: config.fov_degrees.to_radians(),
            near: config.near_plane,
            far: config.far_plane,
            aspect: config.aspect_ratio(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Track the new output size; zero-sized (minimized) windows are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self) -> Mat4 {
        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(self.eye, self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_radians, self.aspect, self.near, self.far);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(&RenderConfig::default());
        let view_proj = camera.view_proj();

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);

        // Origin projects to the center of the screen
        let center = view_proj.project_point3(Vec3::ZERO);
        assert!(center.x.abs() < 1e-5);
        assert!(center.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&center.z));
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = CameraSystem::new(&RenderConfig::default());
        camera.resize(800, 800);
        assert_eq!(camera.aspect(), 1.0);

        // Minimized window keeps the last aspect
        camera.resize(0, 0);
        assert_eq!(camera.aspect(), 1.0);
    }

    #[test]
    fn test_sphere_fits_in_view_at_rest() {
        let camera = CameraSystem::new(&RenderConfig::default());
        let view_proj = camera.view_proj();

        // Top of a radius-2 sphere stays inside the frustum
        let top = view_proj.project_point3(Vec3::new(0.0, 2.0, 0.0));
        assert!(top.y > 0.0 && top.y < 1.0);
    }
}
