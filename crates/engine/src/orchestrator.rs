//! Frame orchestration over an interleaved buffer.
//!
//! Frames are processed strictly in temporal order and, within a frame,
//! channels in index order: suppressor states carry statistics across
//! frames, so no frame may be skipped or reordered once a run starts.
//! Samples after the last whole frame are never touched.

use nsclean_common::error::{DenoiseError, DenoiseResult};
use nsclean_common::level::SuppressionLevel;
use nsclean_pcm_io::AudioBuffer;

use crate::backend::SuppressorBackend;
use crate::geometry::FrameGeometry;
use crate::lifecycle::ChannelStates;

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    pub geometry: FrameGeometry,
    pub backend: &'static str,
}

/// Denoise `buffer` in place, one frame and one channel at a time.
///
/// An empty buffer returns [`DenoiseError::EmptyBuffer`] before any state
/// is created. The buffer length, rate, and channel count never change.
pub fn process(
    buffer: &mut AudioBuffer,
    backend: &dyn SuppressorBackend,
    level: SuppressionLevel,
) -> DenoiseResult<ProcessReport> {
    if buffer.is_empty() {
        return Err(DenoiseError::EmptyBuffer);
    }

    let sample_rate = buffer.sample_rate();
    let geometry = FrameGeometry::new(
        sample_rate,
        usize::from(buffer.channel_count()),
        buffer.total_sample_count(),
    )?;

    let mut scratch: Vec<i16> = Vec::new();
    scratch
        .try_reserve_exact(geometry.frame_len)
        .map_err(|e| DenoiseError::allocation(format!("scratch frame: {e}")))?;
    scratch.resize(geometry.frame_len, 0);

    let mut states =
        ChannelStates::init_all(backend, geometry.channel_count, sample_rate, level)?;

    tracing::debug!(
        backend = backend.name(),
        frame_len = geometry.frame_len,
        frames = geometry.frame_count,
        channels = geometry.channel_count,
        "Processing frames"
    );

    let channels = geometry.channel_count;
    let mut frames_done = 0usize;
    for window in buffer
        .samples_mut()
        .chunks_exact_mut(geometry.window_len())
    {
        for (channel, state) in states.iter_mut().enumerate() {
            deinterleave(window, channel, channels, &mut scratch);
            state.analyze(&scratch);
            state.process(&mut scratch);
            reinterleave(&scratch, channel, channels, window);
        }
        frames_done += 1;
    }
    debug_assert_eq!(frames_done, geometry.frame_count);

    if geometry.trailing_samples > 0 {
        tracing::debug!(
            trailing_samples = geometry.trailing_samples,
            "Trailing partial frame left unprocessed"
        );
    }

    states.destroy_all();

    Ok(ProcessReport {
        geometry,
        backend: backend.name(),
    })
}

/// Copy channel `channel` out of one interleaved frame window.
fn deinterleave(window: &[i16], channel: usize, channels: usize, scratch: &mut [i16]) {
    debug_assert_eq!(window.len(), scratch.len() * channels);
    debug_assert!(channel < channels);
    for (k, slot) in scratch.iter_mut().enumerate() {
        *slot = window[k * channels + channel];
    }
}

/// Write a single-channel frame back into its interleaved window.
fn reinterleave(scratch: &[i16], channel: usize, channels: usize, window: &mut [i16]) {
    debug_assert_eq!(window.len(), scratch.len() * channels);
    debug_assert!(channel < channels);
    for (k, &sample) in scratch.iter().enumerate() {
        window[k * channels + channel] = sample;
    }
}
