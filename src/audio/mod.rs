//! Audio capture and spectrum analysis.
//!
//! An [`AudioInput`] is requested once at startup. On success it yields a
//! [`FrequencySource`] that the frame loop polls for the newest byte
//! magnitude snapshot; on failure the sphere simply idles.

mod analyser;
mod replay;
mod system;

use thiserror::Error;

// Re-export public types
pub use analyser::{blackman_window, SpectrumAnalyser};
pub use replay::WavReplay;
pub use system::Microphone;

/// Why audio could not be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedReason {
    /// The user or the OS refused access to the input
    PermissionDenied,
    /// No usable device (missing, busy, unsupported or unreadable)
    DeviceUnavailable,
}

/// The only audio error: the stream could not be opened
#[derive(Debug, Error)]
#[error("Unable to access audio input: {message}")]
pub struct AudioAccessDenied {
    pub reason: DeniedReason,
    pub message: String,
}

impl AudioAccessDenied {
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self {
            reason: DeniedReason::PermissionDenied,
            message: message.into(),
        }
    }

    pub fn device_unavailable(message: impl Into<String>) -> Self {
        Self {
            reason: DeniedReason::DeviceUnavailable,
            message: message.into(),
        }
    }
}

/// Live source of frequency magnitude snapshots
pub trait FrequencySource {
    /// Length of a snapshot
    fn bin_count(&self) -> usize;

    /// Copy the newest snapshot into `out` (bytes in [0, 255])
    ///
    /// Never blocks on audio; stale or silent data is acceptable.
    fn frequency_snapshot(&mut self, out: &mut [u8]);
}

/// Capability to open an audio stream
pub trait AudioInput {
    /// One-time request for a stream
    fn request_stream(&mut self) -> Result<Box<dyn FrequencySource>, AudioAccessDenied>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let err = AudioAccessDenied::device_unavailable("No audio input device found");
        assert_eq!(err.reason, DeniedReason::DeviceUnavailable);
        assert_eq!(
            err.to_string(),
            "Unable to access audio input: No audio input device found"
        );
    }
}
