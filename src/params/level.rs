//! Speech level smoothing and gating parameters.

use serde::Deserialize;

/// Parameters of the level estimator (all dimensionless, levels in [0, 1])
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelParams {
    /// Fraction of the gap closed per frame when the level rises
    pub attack: f32,

    /// Fraction of the gap closed per frame when the level falls
    pub release: f32,

    /// Smoothed levels strictly below this are treated as silence
    /// (keeps background noise from wobbling the sphere)
    pub threshold: f32,

    /// Gain applied after remapping [threshold, 1] onto [0, 1], then clipped to 1
    pub boost_gain: f32,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            attack: 0.45,  // Snappy reaction to speech onset
            release: 0.08, // Slow fade on silence
            threshold: 0.04,
            boost_gain: 1.6,
        }
    }
}

impl LevelParams {
    /// Keep smoothed and boosted levels inside [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        if !(self.attack > 0.0 && self.attack <= 1.0) {
            return Err(format!("Attack must be in (0, 1], got {}", self.attack));
        }
        if !(self.release > 0.0 && self.release <= 1.0) {
            return Err(format!("Release must be in (0, 1], got {}", self.release));
        }
        if !(0.0..1.0).contains(&self.threshold) {
            return Err(format!(
                "Threshold must be in [0, 1), got {}",
                self.threshold
            ));
        }
        if !(self.boost_gain > 0.0) {
            return Err(format!("Boost gain must be > 0, got {}", self.boost_gain));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_valid() {
        assert!(LevelParams::default().validate().is_ok());
    }

    fn with(edit: impl FnOnce(&mut LevelParams)) -> LevelParams {
        let mut params = LevelParams::default();
        edit(&mut params);
        params
    }

    #[test]
    fn test_out_of_range_level_rejected() {
        let bad = [
            with(|p| p.attack = 0.0),
            with(|p| p.attack = 3.0),
            with(|p| p.release = 1.5),
            with(|p| p.threshold = 1.0),
            with(|p| p.threshold = -0.1),
            with(|p| p.boost_gain = 0.0),
        ];
        for params in bad {
            assert!(params.validate().is_err(), "accepted {:?}", params);
        }

        // Instant response on both edges is allowed
        let instant = LevelParams {
            attack: 1.0,
            release: 1.0,
            threshold: 0.0,
            ..LevelParams::default()
        };
        assert!(instant.validate().is_ok());
    }
}
