//! Pluggable noise suppression backends.
//!
//! A backend is a factory for per-channel suppressor states. Each state
//! carries running statistics across frames, so one state serves exactly
//! one channel for the length of a run. Dropping a state destroys it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use nsclean_common::error::DenoiseResult;
use nsclean_common::level::SuppressionLevel;

use crate::passthrough::PassthroughBackend;
use crate::stationary::StationaryBackend;

/// Per-channel suppressor state.
///
/// Call order for every run: `init`, `set_level`, then for each frame
/// `analyze` followed by `process` on the same samples.
pub trait ChannelSuppressor {
    /// Prepare the state for audio at `sample_rate`.
    fn init(&mut self, sample_rate: u32) -> DenoiseResult<()>;

    /// Apply the aggressiveness level. Requires a prior `init`.
    fn set_level(&mut self, level: SuppressionLevel) -> DenoiseResult<()>;

    /// Update internal statistics from one frame without modifying it.
    fn analyze(&mut self, frame: &[i16]);

    /// Denoise one frame in place, using statistics from the last `analyze`.
    fn process(&mut self, frame: &mut [i16]);
}

/// Factory for per-channel suppressor states.
pub trait SuppressorBackend {
    /// Short backend identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Allocate a fresh, uninitialized state.
    fn create(&self) -> DenoiseResult<Box<dyn ChannelSuppressor>>;
}

/// Built-in backends selectable from configuration or the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Single-band stationary noise suppressor.
    #[default]
    Stationary,
    /// Identity: frames pass through unchanged.
    Passthrough,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Stationary => "stationary",
            BackendKind::Passthrough => "passthrough",
        }
    }

    /// Build a backend instance of this kind.
    pub fn instantiate(&self) -> Box<dyn SuppressorBackend> {
        match self {
            BackendKind::Stationary => Box::new(StationaryBackend),
            BackendKind::Passthrough => Box::new(PassthroughBackend),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stationary" => Ok(BackendKind::Stationary),
            "passthrough" | "identity" => Ok(BackendKind::Passthrough),
            other => Err(format!(
                "Unknown backend: {other}. Use: stationary, passthrough"
            )),
        }
    }
}
