use nsclean_common::level::SuppressionLevel;
use nsclean_engine::passthrough::PassthroughBackend;
use nsclean_engine::stationary::StationaryBackend;
use nsclean_engine::{process, FrameGeometry};
use nsclean_pcm_io::AudioBuffer;
use proptest::prelude::*;

const RATES: [u32; 6] = [8000, 11025, 16000, 22050, 44100, 48000];

fn noisy_buffer(rate: u32, channels: u16, frames: usize, seed: u32) -> AudioBuffer {
    let mut state = seed;
    let samples = (0..frames * channels as usize)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 16) as i16
        })
        .collect();
    AudioBuffer::new(samples, rate, channels).expect("layout is valid by construction")
}

fn level_strategy() -> impl Strategy<Value = SuppressionLevel> {
    prop::sample::select(SuppressionLevel::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn trailing_partial_frame_is_untouched(
        rate in prop::sample::select(RATES.to_vec()),
        channels in 1u16..=4,
        frames in 1usize..1_500,
        seed in any::<u32>(),
        level in level_strategy(),
    ) {
        let mut buffer = noisy_buffer(rate, channels, frames, seed);
        let original = buffer.clone();

        let report = process(&mut buffer, &StationaryBackend, level).unwrap();
        let geometry = report.geometry;
        let processed = geometry.processed_samples();

        prop_assert_eq!(
            geometry,
            FrameGeometry::new(rate, channels as usize, original.total_sample_count()).unwrap()
        );
        prop_assert_eq!(processed + geometry.trailing_samples, original.total_sample_count());
        prop_assert_eq!(&buffer.samples()[processed..], &original.samples()[processed..]);
        prop_assert_eq!(buffer.sample_rate(), original.sample_rate());
        prop_assert_eq!(buffer.channel_count(), original.channel_count());
    }

    #[test]
    fn passthrough_backend_is_identity(
        rate in prop::sample::select(RATES.to_vec()),
        channels in 1u16..=6,
        frames in 1usize..2_000,
        seed in any::<u32>(),
        level in level_strategy(),
    ) {
        let mut buffer = noisy_buffer(rate, channels, frames, seed);
        let original = buffer.clone();

        process(&mut buffer, &PassthroughBackend, level).unwrap();

        prop_assert_eq!(buffer, original);
    }
}
