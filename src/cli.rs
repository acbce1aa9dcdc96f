//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::audio::{AudioInput, Microphone, WavReplay};
use crate::params::{ColorMode, Config, Deformation};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Vibesphere")]
#[command(about = "Microphone-reactive 3D sphere", long_about = None)]
pub struct Args {
    /// TOML file overriding any of the [level], [shape], [analyser], [render] defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Deformation style while speaking
    #[arg(long, value_enum)]
    pub deform: Option<Deformation>,

    /// Surface coloring style
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Sphere resolution (segments around and top-to-bottom)
    #[arg(long, value_name = "N")]
    pub segments: Option<usize>,

    /// Replay a WAV file in a loop instead of listening to the microphone
    #[arg(long, value_name = "FILE", conflicts_with = "mute")]
    pub replay: Option<PathBuf>,

    /// Do not open any audio input (sphere stays idle)
    #[arg(long)]
    pub mute: bool,
}

impl Args {
    /// Build the effective configuration: defaults, then file, then flags
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(deform) = self.deform {
            config.shape.deformation = deform;
        }
        if let Some(color) = self.color {
            config.shape.color_mode = color;
        }
        if let Some(segments) = self.segments {
            config.shape.segments_width = segments;
            config.shape.segments_height = segments;
        }

        config.validate()?;
        Ok(config)
    }

    /// Select the audio input collaborator (None when muted)
    pub fn audio_input(&self, config: &Config) -> Option<Box<dyn AudioInput>> {
        if self.mute {
            return None;
        }
        match &self.replay {
            Some(path) => Some(Box::new(WavReplay::new(path, config.analyser.clone()))),
            None => Some(Box::new(Microphone::new(config.analyser.clone()))),
        }
    }
}
