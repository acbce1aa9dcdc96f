//! Surface color and emission driven by the boosted level.

/// Fixed-function material values for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialColor {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

/// Edge halo parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimGlow {
    /// Halo hue in [0, 1)
    pub hue: f32,
    /// Multiplier on the `(1 - |N·V|)^2` rim term
    pub strength: f32,
}

/// Shading selected for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    Material(MaterialColor),
    Rim(RimGlow),
}

/// Cyan at rest, sliding toward orange/red as the level rises
pub fn material_color(boosted: f32) -> MaterialColor {
    if boosted == 0.0 {
        return MaterialColor {
            color: [0.0, 1.0, 1.0],
            emissive: [0.0, 0.05, 0.1],
            emissive_intensity: 0.6,
        };
    }

    // Quantized to byte steps like a hex color
    let r = (255.0 * boosted).floor();
    let g = 255.0 - (144.0 * boosted).floor();
    let b = 255.0 - (255.0 * boosted).floor();
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);

    MaterialColor {
        color: [r, g, b],
        emissive: [r * 0.7, g * 0.3, b * 0.7],
        emissive_intensity: 0.7 + boosted * 2.5,
    }
}

/// Hue cycles with time and jumps with the level; strength is zero at rest
pub fn rim_glow(time_s: f32, boosted: f32) -> RimGlow {
    RimGlow {
        hue: (0.2 * time_s + 0.7 * boosted).rem_euclid(1.0),
        strength: boosted * 2.5,
    }
}

/// Rim term for a surface normal and view direction (both unit length)
pub fn rim_factor(normal_dot_view: f32) -> f32 {
    let edge = 1.0 - normal_dot_view.abs().min(1.0);
    edge * edge
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_material() {
        let rest = material_color(0.0);
        assert_eq!(rest.color, [0.0, 1.0, 1.0]);
        assert_eq!(rest.emissive_intensity, 0.6);
    }

    #[test]
    fn test_full_level_material() {
        let loud = material_color(1.0);
        assert_eq!(loud.color[0], 1.0);
        assert!((loud.color[1] - 111.0 / 255.0).abs() < 1e-6);
        assert_eq!(loud.color[2], 0.0);
        assert!((loud.emissive_intensity - 3.2).abs() < 1e-6);
        assert!((loud.emissive[0] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_material_channels_are_byte_steps() {
        let c = material_color(0.5);
        assert_eq!(c.color[0], 127.0 / 255.0);
        assert_eq!(c.color[1], 183.0 / 255.0);
        assert_eq!(c.color[2], 128.0 / 255.0);
    }

    #[test]
    fn test_rim_glow() {
        let idle = rim_glow(3.0, 0.0);
        assert_eq!(idle.strength, 0.0);
        assert!((idle.hue - 0.6).abs() < 1e-5);

        let loud = rim_glow(0.0, 1.0);
        assert!((loud.hue - 0.7).abs() < 1e-6);
        assert_eq!(loud.strength, 2.5);

        for i in 0..100 {
            let glow = rim_glow(i as f32 * 0.37, 0.5);
            assert!((0.0..1.0).contains(&glow.hue));
        }
    }

    #[test]
    fn test_rim_factor() {
        assert_eq!(rim_factor(1.0), 0.0); // Facing the viewer
        assert_eq!(rim_factor(-1.0), 0.0);
        assert_eq!(rim_factor(0.0), 1.0); // Silhouette edge
        assert!((rim_factor(0.5) - 0.25).abs() < 1e-6);
    }
}
