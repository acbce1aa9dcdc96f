//! WAV file played back as a live input, looping in real time.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use super::analyser::SpectrumAnalyser;
use super::{AudioAccessDenied, AudioInput, FrequencySource};
use crate::params::AnalyserConfig;

/// Audio input backed by a WAV file instead of a device
pub struct WavReplay {
    path: PathBuf,
    config: AnalyserConfig,
}

impl WavReplay {
    pub fn new(path: impl Into<PathBuf>, config: AnalyserConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    /// Decode the file into a replay stream
    pub fn open(&self) -> Result<ReplayStream, AudioAccessDenied> {
        let samples = read_mono(&self.path)?;
        info!(
            "Audio: replaying {} ({:.1}s @ {}Hz)",
            self.path.display(),
            samples.data.len() as f32 / samples.sample_rate as f32,
            samples.sample_rate
        );
        Ok(ReplayStream::new(samples.data, samples.sample_rate, self.config.clone()))
    }
}

impl AudioInput for WavReplay {
    fn request_stream(&mut self) -> Result<Box<dyn FrequencySource>, AudioAccessDenied> {
        Ok(Box::new(self.open()?))
    }
}

/// Decoded mono samples ready for playback
pub struct ReplayStream {
    samples: Vec<f32>,
    sample_rate: u32,
    analyser: SpectrumAnalyser,
    window: Vec<f32>,
    start: Instant,
}

impl ReplayStream {
    fn new(samples: Vec<f32>, sample_rate: u32, config: AnalyserConfig) -> Self {
        let window = vec![0.0; config.fft_size];
        Self {
            samples,
            sample_rate,
            analyser: SpectrumAnalyser::new(config),
            window,
            start: Instant::now(),
        }
    }

    /// Snapshot of the window ending `elapsed_s` seconds into the (looped) file
    pub fn snapshot_at(&mut self, elapsed_s: f32, out: &mut [u8]) {
        let len = self.samples.len();
        if len == 0 {
            out.fill(0);
            return;
        }

        let end = (elapsed_s.max(0.0) as f64 * self.sample_rate as f64) as usize;
        let size = self.window.len();
        for (i, slot) in self.window.iter_mut().enumerate() {
            // Index of sample (end - size + i), wrapped around the loop
            let idx = (end + len * (size / len + 1) + i - size) % len;
            *slot = self.samples[idx];
        }

        self.analyser.analyse(&self.window, out);
    }
}

impl FrequencySource for ReplayStream {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn frequency_snapshot(&mut self, out: &mut [u8]) {
        let elapsed = self.start.elapsed().as_secs_f32();
        self.snapshot_at(elapsed, out);
    }
}

struct MonoSamples {
    data: Vec<f32>,
    sample_rate: u32,
}

/// Read any PCM/float WAV and downmix to mono f32 in [-1, 1]
fn read_mono(path: &Path) -> Result<MonoSamples, AudioAccessDenied> {
    let unreadable =
        |e: hound::Error| AudioAccessDenied::device_unavailable(format!("{}: {}", path.display(), e));

    let mut reader = hound::WavReader::open(path).map_err(unreadable)?;
    let format = reader.spec();

    let interleaved: Vec<f32> = match format.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(unreadable)?,
        hound::SampleFormat::Int => {
            let full_scale = (1i64 << (format.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<Result<_, _>>()
                .map_err(unreadable)?
        }
    };

    let channels = usize::from(format.channels.max(1));
    let data = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    Ok(MonoSamples {
        data,
        sample_rate: format.sample_rate,
    })
}
