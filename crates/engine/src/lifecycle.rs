//! All-or-nothing management of per-channel suppressor states.

use nsclean_common::error::{DenoiseError, DenoiseResult, InitStage};
use nsclean_common::level::SuppressionLevel;

use crate::backend::{ChannelSuppressor, SuppressorBackend};

/// One live suppressor state per channel, in channel order.
///
/// Either every channel has a fully configured state or none exists:
/// `init_all` destroys the states it already built before reporting a
/// failure. States are destroyed when this value is dropped or passed to
/// [`ChannelStates::destroy_all`].
pub struct ChannelStates {
    states: Vec<Box<dyn ChannelSuppressor>>,
}

impl ChannelStates {
    /// Create, initialize, and configure a state for each channel.
    pub fn init_all(
        backend: &dyn SuppressorBackend,
        channel_count: usize,
        sample_rate: u32,
        level: SuppressionLevel,
    ) -> DenoiseResult<Self> {
        let mut states: Vec<Box<dyn ChannelSuppressor>> = Vec::new();
        states.try_reserve_exact(channel_count).map_err(|e| {
            DenoiseError::allocation(format!("state slots for {channel_count} channels: {e}"))
        })?;

        for channel in 0..channel_count {
            match init_channel(backend, channel, sample_rate, level) {
                Ok(state) => states.push(state),
                Err(e) => {
                    tracing::warn!(
                        backend = backend.name(),
                        channel,
                        rolled_back = states.len(),
                        "Channel state setup failed: {e}"
                    );
                    Self { states }.destroy_all();
                    return Err(e);
                }
            }
        }

        tracing::debug!(
            backend = backend.name(),
            channels = channel_count,
            sample_rate,
            level = %level,
            "Channel states ready"
        );

        Ok(Self { states })
    }

    /// Destroy every state in channel order. Returns how many were destroyed.
    pub fn destroy_all(mut self) -> usize {
        let count = self.states.len();
        for state in self.states.drain(..) {
            drop(state);
        }
        tracing::debug!(destroyed = count, "Channel states destroyed");
        count
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn ChannelSuppressor>> {
        self.states.iter_mut()
    }
}

fn init_channel(
    backend: &dyn SuppressorBackend,
    channel: usize,
    sample_rate: u32,
    level: SuppressionLevel,
) -> DenoiseResult<Box<dyn ChannelSuppressor>> {
    let mut state = backend.create().map_err(|e| match e {
        DenoiseError::Allocation { .. } => e,
        other => DenoiseError::channel_init(channel, InitStage::Create, other.to_string()),
    })?;

    // On failure below, `state` drops here and is destroyed.
    state
        .init(sample_rate)
        .map_err(|e| DenoiseError::channel_init(channel, InitStage::Init, e.to_string()))?;
    state
        .set_level(level)
        .map_err(|e| DenoiseError::channel_init(channel, InitStage::Configure, e.to_string()))?;

    Ok(state)
}
