//! Identity backend: every frame is returned unchanged.

use nsclean_common::error::DenoiseResult;
use nsclean_common::level::SuppressionLevel;

use crate::backend::{ChannelSuppressor, SuppressorBackend};

#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughBackend;

impl SuppressorBackend for PassthroughBackend {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn create(&self) -> DenoiseResult<Box<dyn ChannelSuppressor>> {
        Ok(Box::new(PassthroughState))
    }
}

struct PassthroughState;

impl ChannelSuppressor for PassthroughState {
    fn init(&mut self, _sample_rate: u32) -> DenoiseResult<()> {
        Ok(())
    }

    fn set_level(&mut self, _level: SuppressionLevel) -> DenoiseResult<()> {
        Ok(())
    }

    fn analyze(&mut self, _frame: &[i16]) {}

    fn process(&mut self, _frame: &mut [i16]) {}
}
