//! Frame geometry derived from sample rate and buffer size.

use serde::Serialize;

use nsclean_common::error::{DenoiseError, DenoiseResult};

/// Upper bound on samples per channel in one analysis frame.
pub const MAX_FRAME_LEN: usize = 160;

/// Frames per second of audio (10 ms frames).
pub const FRAMES_PER_SECOND: u32 = 100;

/// How a buffer is cut into analysis frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameGeometry {
    /// Samples per channel in one frame.
    pub frame_len: usize,
    /// Interleaved channels.
    pub channel_count: usize,
    /// Whole frames in the buffer.
    pub frame_count: usize,
    /// Interleaved samples after the last whole frame; left unprocessed.
    pub trailing_samples: usize,
}

impl FrameGeometry {
    /// Samples per channel in a frame at `sample_rate`: `min(160, rate / 100)`.
    pub fn frame_len_for(sample_rate: u32) -> usize {
        MAX_FRAME_LEN.min((sample_rate / FRAMES_PER_SECOND) as usize)
    }

    /// Compute the geometry for `total_samples` interleaved samples.
    ///
    /// A sample rate too low to fill a single-sample frame is an error.
    pub fn new(
        sample_rate: u32,
        channel_count: usize,
        total_samples: usize,
    ) -> DenoiseResult<Self> {
        let frame_len = Self::frame_len_for(sample_rate);
        if frame_len == 0 || channel_count == 0 {
            return Err(DenoiseError::Geometry { sample_rate });
        }

        let window = frame_len * channel_count;
        let frame_count = total_samples / window;

        Ok(Self {
            frame_len,
            channel_count,
            frame_count,
            trailing_samples: total_samples - frame_count * window,
        })
    }

    /// Interleaved samples covered by one frame across all channels.
    pub fn window_len(&self) -> usize {
        self.frame_len * self.channel_count
    }

    /// Interleaved samples covered by all whole frames.
    pub fn processed_samples(&self) -> usize {
        self.frame_count * self.window_len()
    }
}
