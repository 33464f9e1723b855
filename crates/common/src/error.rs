//! Error types shared across nsclean crates.

use std::fmt;
use std::path::PathBuf;

/// Step of channel-state setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStage {
    /// Allocating the suppressor state.
    Create,
    /// Initializing the state for the sample rate.
    Init,
    /// Applying the aggressiveness level.
    Configure,
}

impl fmt::Display for InitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitStage::Create => "create",
            InitStage::Init => "init",
            InitStage::Configure => "configure",
        };
        f.write_str(name)
    }
}

/// Top-level error type for nsclean operations.
#[derive(Debug, thiserror::Error)]
pub enum DenoiseError {
    #[error("Read error [{path}]: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Allocation error: {message}")]
    Allocation { message: String },

    #[error("Channel {channel} failed to {stage}: {message}")]
    ChannelInit {
        channel: usize,
        stage: InitStage,
        message: String,
    },

    #[error("Frame geometry error: sample rate {sample_rate} Hz yields an empty frame")]
    Geometry { sample_rate: u32 },

    #[error("Nothing to do: audio buffer is empty")]
    EmptyBuffer,

    #[error("Invalid audio buffer: {message}")]
    InvalidBuffer { message: String },

    #[error("Suppressor backend error: {message}")]
    Backend { message: String },

    #[error("Write error [{path}]: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using DenoiseError.
pub type DenoiseResult<T> = Result<T, DenoiseError>;

impl DenoiseError {
    pub fn read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Write {
            path: path.into(),
            message: msg.into(),
        }
    }

    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation {
            message: msg.into(),
        }
    }

    pub fn channel_init(channel: usize, stage: InitStage, msg: impl Into<String>) -> Self {
        Self::ChannelInit {
            channel,
            stage,
            message: msg.into(),
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend {
            message: msg.into(),
        }
    }

    pub fn invalid_buffer(msg: impl Into<String>) -> Self {
        Self::InvalidBuffer {
            message: msg.into(),
        }
    }

    /// Whether this error only signals that there was no audio to process.
    pub fn is_nothing_to_do(&self) -> bool {
        matches!(self, Self::EmptyBuffer)
    }

    /// Pipeline stage the error belongs to: `read`, `process`, `write`,
    /// or `config` / `io` for ambient failures.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Read { .. } | Self::InvalidBuffer { .. } | Self::FileNotFound { .. } => "read",
            Self::Allocation { .. }
            | Self::ChannelInit { .. }
            | Self::Geometry { .. }
            | Self::EmptyBuffer
            | Self::Backend { .. } => "process",
            Self::Write { .. } => "write",
            Self::Config { .. } => "config",
            Self::Io(_) | Self::Json(_) | Self::Other(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_init_message_names_stage() {
        let err = DenoiseError::channel_init(2, InitStage::Init, "unsupported rate");
        assert_eq!(err.to_string(), "Channel 2 failed to init: unsupported rate");
    }

    #[test]
    fn test_read_error_names_path() {
        let err = DenoiseError::read("/tmp/in.wav", "not a wav");
        assert!(err.to_string().contains("/tmp/in.wav"));
    }

    #[test]
    fn test_only_empty_buffer_is_nothing_to_do() {
        assert!(DenoiseError::EmptyBuffer.is_nothing_to_do());
        assert!(!DenoiseError::Geometry { sample_rate: 5 }.is_nothing_to_do());
    }

    #[test]
    fn test_stage_names_failing_step() {
        assert_eq!(DenoiseError::read("in.wav", "bad header").stage(), "read");
        assert_eq!(DenoiseError::Geometry { sample_rate: 5 }.stage(), "process");
        assert_eq!(
            DenoiseError::channel_init(0, InitStage::Create, "oom").stage(),
            "process"
        );
        assert_eq!(DenoiseError::allocation("scratch").stage(), "process");
        assert_eq!(DenoiseError::write("out.wav", "disk full").stage(), "write");
    }
}
