//! Speech level estimation from frequency snapshots.
//!
//! Reduces a byte magnitude spectrum to a single level, smooths it with a
//! fast-attack / slow-release filter, then gates and remaps it into the
//! "boosted" activity value that drives every visual parameter.

use crate::params::LevelParams;

/// Level values produced for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelReading {
    /// Mean spectrum magnitude this frame, in [0, 1]
    pub raw: f32,
    /// Filtered level carried across frames, in [0, 1]
    pub smoothed: f32,
    /// Gated and remapped activity, in [0, 1]
    pub boosted: f32,
}

/// Mean of all bins normalized to [0, 1]; empty snapshots read as silence
pub fn raw_level(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u64 = bins.iter().map(|&b| u64::from(b)).sum();
    let avg = sum as f32 / bins.len() as f32;
    (avg / 255.0).clamp(0.0, 1.0)
}

/// One step of the asymmetric smoothing filter
pub fn smooth(previous: f32, raw: f32, params: &LevelParams) -> f32 {
    let rate = if raw > previous {
        params.attack
    } else {
        params.release
    };
    previous + (raw - previous) * rate
}

/// Gate below the threshold, then remap the rest onto [0, 1] with gain
pub fn boost(smoothed: f32, params: &LevelParams) -> f32 {
    if smoothed < params.threshold {
        return 0.0;
    }
    let norm = (smoothed - params.threshold) / (1.0 - params.threshold);
    (norm * params.boost_gain).min(1.0)
}

/// Level estimator holding the only cross-frame audio state
#[derive(Debug, Clone)]
pub struct LevelEstimator {
    params: LevelParams,
    smoothed: f32,
}

impl LevelEstimator {
    pub fn new(params: LevelParams) -> Self {
        Self {
            params,
            smoothed: 0.0,
        }
    }

    /// Current smoothed level
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    pub fn params(&self) -> &LevelParams {
        &self.params
    }

    /// Advance one frame
    ///
    /// `bins` is `None` while no audio source is available, which reads as
    /// a raw level of zero.
    pub fn update(&mut self, bins: Option<&[u8]>) -> LevelReading {
        let raw = bins.map(raw_level).unwrap_or(0.0);
        self.smoothed = smooth(self.smoothed, raw, &self.params);

        LevelReading {
            raw,
            smoothed: self.smoothed,
            boosted: boost(self.smoothed, &self.params),
        }
    }
}
