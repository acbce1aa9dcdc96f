//! Vibesphere library - Microphone-reactive sphere

pub mod audio;
pub mod camera;
pub mod cli;
pub mod level;
pub mod params;
pub mod rendering;
pub mod sphere;
