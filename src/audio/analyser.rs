//! Byte-scaled magnitude spectrum (FFT, windowing, smoothing, dB mapping).

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::params::AnalyserConfig;

/// Spectrum analyser keeping smoothed magnitudes between analyses
pub struct SpectrumAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes, one per bin
    magnitudes: Vec<f32>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Self {
        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let window = (0..size).map(|i| blackman_window(i, size)).collect();

        Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
            magnitudes: vec![0.0; config.bin_count()],
            config,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.config.bin_count()
    }

    /// Analyse the most recent `fft_size` samples and write a byte snapshot
    ///
    /// Shorter input is treated as preceded by silence. `out` receives at
    /// most `bin_count` values.
    pub fn analyse(&mut self, samples: &[f32], out: &mut [u8]) {
        let size = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(size)..];
        let pad = size - recent.len();

        // Apply Blackman window
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        // Perform FFT
        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let scale = 1.0 / size as f32;
        let db_range = self.config.max_db - self.config.min_db;

        for (k, smoothed) in self.magnitudes.iter_mut().enumerate() {
            let magnitude = self.buffer[k].norm() * scale;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            if !smoothed.is_finite() {
                *smoothed = 0.0;
            }

            if let Some(byte) = out.get_mut(k) {
                *byte = if *smoothed > 0.0 {
                    let db = 20.0 * smoothed.log10();
                    (255.0 / db_range * (db - self.config.min_db)).clamp(0.0, 255.0) as u8
                } else {
                    0
                };
            }
        }
    }
}

/// Blackman window function for FFT analysis
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = 2.0 * PI * index as f32 / size as f32;
    0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
}
