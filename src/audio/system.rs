//! Microphone capture with a background spectrum analysis thread.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::analyser::SpectrumAnalyser;
use super::{AudioAccessDenied, AudioInput, FrequencySource};
use crate::params::AnalyserConfig;

/// Default input device of the default host
pub struct Microphone {
    config: AnalyserConfig,
}

impl Microphone {
    pub fn new(config: AnalyserConfig) -> Self {
        Self { config }
    }
}

impl AudioInput for Microphone {
    fn request_stream(&mut self) -> Result<Box<dyn FrequencySource>, AudioAccessDenied> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| AudioAccessDenied::device_unavailable("No audio input device found"))?;

        let supported = device.default_input_config().map_err(|e| match e {
            cpal::DefaultStreamConfigError::BackendSpecific { err } => backend_error(err),
            other => AudioAccessDenied::device_unavailable(other.to_string()),
        })?;

        info!(
            "Audio: {} @ {}Hz, {} channel(s), {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            supported.sample_rate().0,
            supported.channels(),
            supported.sample_format()
        );

        // Shared state between capture callback and analysis thread
        let samples = Arc::new(Mutex::new(Vec::<f32>::new()));
        let snapshot = Arc::new(Mutex::new(vec![0u8; self.config.bin_count()]));

        let stream_config = supported.config();
        let window = self.config.fft_size;
        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => {
                build_capture_stream::<f32>(&device, &stream_config, Arc::clone(&samples), window)
            }
            cpal::SampleFormat::I16 => {
                build_capture_stream::<i16>(&device, &stream_config, Arc::clone(&samples), window)
            }
            cpal::SampleFormat::U16 => {
                build_capture_stream::<u16>(&device, &stream_config, Arc::clone(&samples), window)
            }
            other => {
                return Err(AudioAccessDenied::device_unavailable(format!(
                    "Unsupported input sample format {:?}",
                    other
                )))
            }
        }
        .map_err(|e| match e {
            cpal::BuildStreamError::BackendSpecific { err } => backend_error(err),
            other => AudioAccessDenied::device_unavailable(other.to_string()),
        })?;

        stream.play().map_err(|e| match e {
            cpal::PlayStreamError::BackendSpecific { err } => backend_error(err),
            other => AudioAccessDenied::device_unavailable(other.to_string()),
        })?;

        // Start spectrum analysis thread
        let running = Arc::new(AtomicBool::new(true));
        let analysis_thread = spawn_analysis_thread(
            self.config.clone(),
            samples,
            Arc::clone(&snapshot),
            Arc::clone(&running),
        );

        Ok(Box::new(MicrophoneStream {
            snapshot,
            running,
            _stream: stream,
            _analysis_thread: Some(analysis_thread),
        }))
    }
}

const REFUSAL_MARKERS: [&str; 5] = ["permission", "denied", "authorized", "eacces", "eperm"];

/// Classify a driver error; only an explicit refusal counts as a permission denial
fn backend_error(err: cpal::BackendSpecificError) -> AudioAccessDenied {
    let message = err.description;
    let lower = message.to_lowercase();
    let refused = REFUSAL_MARKERS
        .iter()
        .any(|marker| lower.contains(marker));

    if refused {
        AudioAccessDenied::permission_denied(message)
    } else {
        AudioAccessDenied::device_unavailable(message)
    }
}

/// Live microphone stream; dropping it stops capture and analysis
struct MicrophoneStream {
    /// Newest byte spectrum (written by the analysis thread)
    snapshot: Arc<Mutex<Vec<u8>>>,

    running: Arc<AtomicBool>,

    /// Audio input stream (kept alive)
    _stream: cpal::Stream,

    _analysis_thread: Option<thread::JoinHandle<()>>,
}

impl FrequencySource for MicrophoneStream {
    fn bin_count(&self) -> usize {
        self.snapshot.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn frequency_snapshot(&mut self, out: &mut [u8]) {
        match self.snapshot.lock() {
            Ok(snapshot) => {
                let n = out.len().min(snapshot.len());
                out[..n].copy_from_slice(&snapshot[..n]);
                out[n..].fill(0);
            }
            Err(_) => out.fill(0),
        }
    }
}

impl Drop for MicrophoneStream {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// Build an input stream that downmixes to mono and keeps a recent window
fn build_capture_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
    window: usize,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = usize::from(config.channels.max(1));

    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let Ok(mut buf) = samples.lock() else {
                return;
            };

            for frame in data.chunks(channels) {
                let sum: f32 = frame.iter().map(|&s| s.to_sample::<f32>()).sum();
                buf.push(sum / frame.len() as f32);
            }

            // Only the newest window is ever analysed
            if buf.len() > window * 2 {
                let excess = buf.len() - window;
                buf.drain(..excess);
            }
        },
        |err| error!("Audio stream error: {}", err),
        None,
    )
}

/// Spawn spectrum analysis thread
fn spawn_analysis_thread(
    config: AnalyserConfig,
    samples: Arc<Mutex<Vec<f32>>>,
    snapshot: Arc<Mutex<Vec<u8>>>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let interval = Duration::from_millis(config.update_interval_ms);
        let mut analyser = SpectrumAnalyser::new(config);
        let mut window = Vec::new();
        let mut bytes = vec![0u8; analyser.bin_count()];

        while running.load(Ordering::Relaxed) {
            thread::sleep(interval);

            // Copy out so the capture callback is never blocked by the FFT
            {
                let Ok(buf) = samples.lock() else {
                    return;
                };
                window.clear();
                window.extend_from_slice(&buf);
            }

            analyser.analyse(&window, &mut bytes);

            match snapshot.lock() {
                Ok(mut shared) => shared.copy_from_slice(&bytes),
                Err(_) => return,
            }
        }
    })
}
