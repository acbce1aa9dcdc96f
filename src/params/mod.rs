//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (seconds, radians per frame, decibels, etc.)
//! - Documented ranges and meanings
//! - Defaults matching the reference look of the sphere

mod audio;
mod level;
mod render;
mod shape;

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

// Re-export all types
pub use audio::AnalyserConfig;
pub use level::LevelParams;
pub use render::{LightParams, RenderConfig};
pub use shape::{ColorMode, Deformation, ShapeParams, MAX_SEGMENTS};

/// Complete tunable configuration, optionally loaded from a TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub level: LevelParams,
    pub shape: ShapeParams,
    pub analyser: AnalyserConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Parse configuration from TOML text (missing fields keep their defaults)
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(text).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file on disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("In config file {}", path.display()))
    }

    /// Validate every section
    pub fn validate(&self) -> anyhow::Result<()> {
        self.level
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid level config: {}", e))?;
        self.analyser
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid analyser config: {}", e))?;
        self.shape
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid shape config: {}", e))?;
        Ok(())
    }
}
