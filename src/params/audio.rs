//! Spectrum analysis configuration.

use serde::Deserialize;

/// Spectrum analyser configuration (byte-scaled magnitude snapshot)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyserConfig {
    /// FFT window size (must be power of 2); snapshot has fft_size / 2 bins
    pub fft_size: usize,

    /// Temporal smoothing between successive analyses, in [0, 1)
    /// 0 = no averaging, 0.8 = heavy averaging
    pub smoothing: f32,

    /// Magnitude mapped to byte 0 (decibels)
    pub min_db: f32,

    /// Magnitude mapped to byte 255 (decibels)
    pub max_db: f32,

    /// Analysis thread update interval (milliseconds)
    /// 16 ≈ one analysis per 60 Hz display frame
    pub update_interval_ms: u64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048, // A bit more spectral detail than the 1024 usual
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            update_interval_ms: 16,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins in a snapshot
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(format!(
                "FFT size must be a power of 2 >= 32, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(format!(
                "Smoothing must be in [0, 1), got {}",
                self.smoothing
            ));
        }
        if self.min_db >= self.max_db {
            return Err(format!(
                "min_db ({}) must be below max_db ({})",
                self.min_db, self.max_db
            ));
        }
        Ok(())
    }
}
