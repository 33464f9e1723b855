//! Single-band stationary noise suppressor.
//!
//! Each channel tracks a noise-floor estimate of the per-frame mean
//! energy. During the first [`STARTUP_FRAMES`] frames the floor is the
//! running mean of frame energies; afterwards it follows decreases quickly
//! and increases slowly (minimum tracking), so speech bursts barely move it.
//!
//! The gain for a frame is the amplitude form of power subtraction,
//! `sqrt(1 - over_subtraction * noise / energy)`, bounded below by the
//! level's gain floor and smoothed across frames. Silence maps to silence.

use nsclean_common::error::{DenoiseError, DenoiseResult};
use nsclean_common::level::SuppressionLevel;

use crate::backend::{ChannelSuppressor, SuppressorBackend};

/// Frames used to seed the noise floor.
pub const STARTUP_FRAMES: u64 = 50;

/// Lowest sample rate whose 10 ms frame holds at least one sample.
const MIN_SAMPLE_RATE: u32 = 100;

/// Fraction of a downward energy step taken per frame.
const NOISE_FALL: f64 = 0.3;

/// Fraction of an upward energy step taken per frame.
const NOISE_RISE: f64 = 0.005;

/// Weight of the previous gain in the frame-to-frame smoothing.
const GAIN_SMOOTHING: f64 = 0.5;

/// Frame energies below this are treated as digital silence.
const ENERGY_EPSILON: f64 = 1e-3;

/// Tuning for one aggressiveness level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Multiplier on the noise estimate before subtraction.
    pub over_subtraction: f64,
    /// Minimum amplitude gain applied to any frame.
    pub gain_floor: f64,
}

impl LevelParams {
    pub fn for_level(level: SuppressionLevel) -> Self {
        match level {
            SuppressionLevel::Low => Self {
                over_subtraction: 1.0,
                gain_floor: 0.5,
            },
            SuppressionLevel::Moderate => Self {
                over_subtraction: 1.0,
                gain_floor: 0.25,
            },
            SuppressionLevel::High => Self {
                over_subtraction: 1.1,
                gain_floor: 0.125,
            },
            SuppressionLevel::VeryHigh => Self {
                over_subtraction: 1.25,
                gain_floor: 0.09,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StationaryBackend;

impl SuppressorBackend for StationaryBackend {
    fn name(&self) -> &'static str {
        "stationary"
    }

    fn create(&self) -> DenoiseResult<Box<dyn ChannelSuppressor>> {
        Ok(Box::new(StationarySuppressor::new()))
    }
}

/// Per-channel state of the stationary suppressor.
#[derive(Debug, Clone)]
pub struct StationarySuppressor {
    sample_rate: Option<u32>,
    params: LevelParams,
    noise_energy: f64,
    frame_energy: f64,
    gain: f64,
    frames_analyzed: u64,
}

impl Default for StationarySuppressor {
    fn default() -> Self {
        Self::new()
    }
}

impl StationarySuppressor {
    pub fn new() -> Self {
        Self {
            sample_rate: None,
            params: LevelParams::for_level(SuppressionLevel::default()),
            noise_energy: 0.0,
            frame_energy: 0.0,
            gain: 1.0,
            frames_analyzed: 0,
        }
    }

    /// Current noise-floor estimate (mean squared sample value).
    pub fn noise_energy(&self) -> f64 {
        self.noise_energy
    }

    fn target_gain(&self) -> f64 {
        if self.frame_energy <= ENERGY_EPSILON {
            return self.params.gain_floor;
        }
        let ratio = self.params.over_subtraction * self.noise_energy / self.frame_energy;
        (1.0 - ratio).max(0.0).sqrt().max(self.params.gain_floor)
    }
}

fn mean_energy(frame: &[i16]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: f64 = frame.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    sum / frame.len() as f64
}

impl ChannelSuppressor for StationarySuppressor {
    fn init(&mut self, sample_rate: u32) -> DenoiseResult<()> {
        if sample_rate < MIN_SAMPLE_RATE {
            return Err(DenoiseError::backend(format!(
                "unsupported sample rate {sample_rate} Hz"
            )));
        }
        *self = Self {
            sample_rate: Some(sample_rate),
            ..Self::new()
        };
        Ok(())
    }

    fn set_level(&mut self, level: SuppressionLevel) -> DenoiseResult<()> {
        if self.sample_rate.is_none() {
            return Err(DenoiseError::backend("level set before init"));
        }
        self.params = LevelParams::for_level(level);
        Ok(())
    }

    fn analyze(&mut self, frame: &[i16]) {
        let energy = mean_energy(frame);

        if self.frames_analyzed < STARTUP_FRAMES {
            let n = self.frames_analyzed as f64;
            self.noise_energy += (energy - self.noise_energy) / (n + 1.0);
        } else if energy < self.noise_energy {
            self.noise_energy += NOISE_FALL * (energy - self.noise_energy);
        } else {
            self.noise_energy += NOISE_RISE * (energy - self.noise_energy);
        }

        self.frame_energy = energy;
        self.frames_analyzed += 1;
    }

    fn process(&mut self, frame: &mut [i16]) {
        let target = self.target_gain();
        self.gain = GAIN_SMOOTHING * self.gain + (1.0 - GAIN_SMOOTHING) * target;

        for sample in frame.iter_mut() {
            let scaled = (f64::from(*sample) * self.gain).round();
            *sample = scaled.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16;
        }
    }
}
