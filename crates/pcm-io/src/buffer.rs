//! Canonical interleaved 16-bit PCM buffer.

use nsclean_common::error::{DenoiseError, DenoiseResult};

/// Interleaved signed 16-bit samples with their rate and channel layout.
///
/// Samples are ordered channel-major within each instant:
/// `[c0, c1, .., cN-1, c0, c1, ..]`. The length is always a multiple of
/// the channel count. The sample vector cannot be resized once built;
/// only its values can be changed through [`AudioBuffer::samples_mut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
    channel_count: u16,
}

impl AudioBuffer {
    /// Build a buffer, checking the layout invariants.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channel_count: u16) -> DenoiseResult<Self> {
        if channel_count == 0 {
            return Err(DenoiseError::invalid_buffer("channel count must be positive"));
        }
        if sample_rate == 0 {
            return Err(DenoiseError::invalid_buffer("sample rate must be positive"));
        }
        if samples.len() % channel_count as usize != 0 {
            return Err(DenoiseError::invalid_buffer(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channel_count
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
            channel_count,
        })
    }

    /// An all-zero buffer holding `frames` samples per channel.
    pub fn silence(sample_rate: u32, channel_count: u16, frames: usize) -> DenoiseResult<Self> {
        Self::new(
            vec![0; frames * channel_count as usize],
            sample_rate,
            channel_count,
        )
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Mutable view of the samples. The length is fixed.
    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Total number of samples across all channels.
    pub fn total_sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channel_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
}
