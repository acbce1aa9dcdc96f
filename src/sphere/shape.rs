//! Mapping from boosted level and time to scale, rotation and displacement.

use glam::{Vec2, Vec3};

use crate::params::{Deformation, ShapeParams};

impl Deformation {
    /// Radial displacement for one vertex
    ///
    /// `base` is the undeformed vertex position, `boosted` the activity level
    /// in [0, 1]. A silent frame is always a perfect sphere.
    pub fn displacement(self, base: Vec3, time_s: f32, boosted: f32) -> f32 {
        if boosted == 0.0 {
            return 0.0;
        }
        let (x, y, t) = (base.x, base.y, time_s);

        match self {
            Deformation::Ripple => {
                (x * 5.0 + t * 6.0).sin() * (y * 5.0 + t * 4.0).cos() * (0.1 + boosted * 0.9)
            }
            Deformation::Layered => {
                let base_wave = (x * 3.0 + t * 4.0).sin() * (y * 3.5 + t * 3.0).cos();
                let audio_wave = (x * 10.0 + t * 12.0).sin() * (y * 8.0 + t * 9.0).cos();
                base_wave * 0.05 + audio_wave * (0.05 + 0.25 * boosted)
            }
        }
    }
}

/// Shape driver owning the persistent rotation accumulators
#[derive(Debug, Clone)]
pub struct ShapeDriver {
    params: ShapeParams,
    /// Accumulated rotation around X and Y (radians)
    rotation: Vec2,
}

impl ShapeDriver {
    pub fn new(params: ShapeParams) -> Self {
        Self {
            params,
            rotation: Vec2::ZERO,
        }
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    /// Current accumulated rotation (x, y radians)
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Uniform scale as a blend of the idle and speaking scales
    pub fn scale(&self, boosted: f32) -> f32 {
        let p = &self.params;
        let speak_scale = p.speak_scale + boosted * p.speak_scale_gain;
        p.idle_scale * (1.0 - boosted) + speak_scale * boosted
    }

    /// Rotation increment for one frame (x, y radians)
    pub fn rotation_delta(&self, boosted: f32) -> Vec2 {
        let p = &self.params;
        Vec2::new(
            p.rotation_x_base + p.rotation_x_gain * boosted,
            p.rotation_y_base + p.rotation_y_gain * boosted,
        )
    }

    /// Accumulate one frame of rotation; silence slows it but never resets it
    pub fn advance_rotation(&mut self, boosted: f32) -> Vec2 {
        self.rotation += self.rotation_delta(boosted);
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_blend() {
        let driver = ShapeDriver::new(ShapeParams::default());
        assert_eq!(driver.scale(0.0), 1.0);
        assert_eq!(driver.scale(1.0), 3.0);
        // Default parameters give 1 + 2b^2
        assert!((driver.scale(0.5) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_scale_keeps_blend_form_with_custom_idle() {
        let params = ShapeParams {
            idle_scale: 0.5,
            ..ShapeParams::default()
        };
        let driver = ShapeDriver::new(params);
        assert_eq!(driver.scale(0.0), 0.5);
        // 0.5 * 0.5 + (1 + 1) * 0.5
        assert!((driver.scale(0.5) - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut driver = ShapeDriver::new(ShapeParams::default());

        let delta = driver.rotation_delta(1.0);
        assert!((delta.x - 0.042).abs() < 1e-6);
        assert!((delta.y - 0.085).abs() < 1e-6);

        driver.advance_rotation(1.0);
        let after_loud = driver.rotation();
        driver.advance_rotation(0.0);
        let after_quiet = driver.rotation();

        // Silence shrinks the increment but keeps the accumulated angle
        assert!((after_quiet.x - after_loud.x - 0.002).abs() < 1e-6);
        assert!((after_quiet.y - after_loud.y - 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_silence_has_no_displacement() {
        let p = Vec3::new(1.2, -0.4, 1.5);
        for variant in [Deformation::Ripple, Deformation::Layered] {
            assert_eq!(variant.displacement(p, 12.3, 0.0), 0.0);
        }
    }

    #[test]
    fn test_ripple_depth_follows_level() {
        // sin(5 * 0.3) * cos(0) at t = 0
        let p = Vec3::new(0.3, 0.0, 0.0);
        let expected_shape = (1.5f32).sin();

        let quiet = Deformation::Ripple.displacement(p, 0.0, 0.1);
        let loud = Deformation::Ripple.displacement(p, 0.0, 1.0);
        assert!((quiet - expected_shape * 0.19).abs() < 1e-5);
        assert!((loud - expected_shape).abs() < 1e-5);
    }

    #[test]
    fn test_layered_bounds() {
        for i in 0..200 {
            let t = i as f32 * 0.05;
            let p = Vec3::new((t * 1.7).sin() * 2.0, (t * 0.9).cos() * 2.0, 0.0);
            let d = Deformation::Layered.displacement(p, t, 1.0);
            // |base| * 0.05 + |wave| * 0.30
            assert!(d.abs() <= 0.35 + 1e-5);
        }
    }
}
