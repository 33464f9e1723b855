//! nsclean PCM I/O
//!
//! Everything that touches audio files:
//! - **AudioBuffer:** the canonical interleaved 16-bit PCM buffer
//! - **Normalize:** decode WAV or MP3 sources into an `AudioBuffer`
//! - **Sink:** write an `AudioBuffer` as 16-bit WAV and verify the write
//! - **Paths:** output naming and input discovery for batch runs

pub mod buffer;
pub mod normalize;
pub mod paths;
pub mod sink;

pub use buffer::AudioBuffer;
pub use normalize::{normalize, quantize_f32, NormalizedAudio, SourceFormat};
pub use sink::{write_output, PcmEncoder, WavEncoder};
