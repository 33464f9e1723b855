//! Timing utilities for measuring processing runs.

use std::time::{Duration, Instant};

/// Monotonic stopwatch started at construction.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Start a new stopwatch anchored to now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time elapsed since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whole milliseconds elapsed since start.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Real-time factor: seconds of audio processed per second of wall time.
///
/// Returns `None` when no measurable time has passed.
pub fn realtime_factor(audio_secs: f64, elapsed: Duration) -> Option<f64> {
    let wall = elapsed.as_secs_f64();
    if wall <= 0.0 {
        None
    } else {
        Some(audio_secs / wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_elapsed() {
        let watch = Stopwatch::start();
        // Should be very small but non-negative
        assert!(watch.elapsed_ms() < 1_000);
        assert!(watch.elapsed() >= Duration::ZERO);
    }

    #[test]
    fn test_realtime_factor() {
        let rtf = realtime_factor(10.0, Duration::from_millis(500)).unwrap();
        assert!((rtf - 20.0).abs() < 1e-9);
        assert!(realtime_factor(1.0, Duration::ZERO).is_none());
    }
}
