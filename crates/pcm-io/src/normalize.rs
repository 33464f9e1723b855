//! Source decoding into canonical 16-bit PCM.
//!
//! Formats are detected by attempting to decode, never by file extension.
//! Decoders run in the fixed order of [`SourceFormat::DECODE_ORDER`]:
//! linear-PCM WAV first, then compressed float sources (MP3).

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use serde::Serialize;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use nsclean_common::error::{DenoiseError, DenoiseResult};

use crate::buffer::AudioBuffer;

/// Supported source encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Uncompressed RIFF/WAV with integer or float samples.
    LinearPcm,
    /// Compressed source decoded to float samples (MP3).
    CompressedFloat,
}

impl SourceFormat {
    /// Order in which decoders are attempted.
    pub const DECODE_ORDER: [SourceFormat; 2] =
        [SourceFormat::LinearPcm, SourceFormat::CompressedFloat];

    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::LinearPcm => "wav",
            SourceFormat::CompressedFloat => "mp3",
        }
    }

    fn decode(&self, path: &Path) -> anyhow::Result<AudioBuffer> {
        match self {
            SourceFormat::LinearPcm => decode_wav(path),
            SourceFormat::CompressedFloat => decode_compressed(path),
        }
    }
}

/// A decoded source and the format that produced it.
#[derive(Debug, Clone)]
pub struct NormalizedAudio {
    pub buffer: AudioBuffer,
    pub format: SourceFormat,
}

/// Decode `path` into canonical interleaved 16-bit PCM.
///
/// Fails with [`DenoiseError::Read`] when no decoder accepts the file.
pub fn normalize(path: &Path) -> DenoiseResult<NormalizedAudio> {
    let mut failures = Vec::with_capacity(SourceFormat::DECODE_ORDER.len());

    for format in SourceFormat::DECODE_ORDER {
        match format.decode(path) {
            Ok(buffer) => {
                tracing::info!(
                    path = %path.display(),
                    format = format.name(),
                    sample_rate = buffer.sample_rate(),
                    channels = buffer.channel_count(),
                    frames = buffer.frames(),
                    "Decoded source audio"
                );
                return Ok(NormalizedAudio { buffer, format });
            }
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    format = format.name(),
                    "Decoder rejected source: {e:#}"
                );
                failures.push(format!("{}: {e:#}", format.name()));
            }
        }
    }

    Err(DenoiseError::read(path, failures.join("; ")))
}

/// Quantize a nominal [-1.0, 1.0] float sample to 16 bits, saturating
/// out-of-range values.
pub fn quantize_f32(sample: f32) -> i16 {
    (sample * 32768.0).clamp(-32768.0, 32767.0) as i16
}

fn decode_wav(path: &Path) -> anyhow::Result<AudioBuffer> {
    let reader = hound::WavReader::open(path).context("not a readable WAV file")?;
    let spec = reader.spec();

    let samples: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 8) => reader
            .into_samples::<i8>()
            .map(|s| s.map(|v| i16::from(v) << 8))
            .collect::<Result<_, _>>()?,
        (hound::SampleFormat::Int, 16) => reader.into_samples::<i16>().collect::<Result<_, _>>()?,
        (hound::SampleFormat::Int, bits @ 17..=32) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| (v >> (bits - 16)) as i16))
            .collect::<Result<_, _>>()?,
        (hound::SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map(quantize_f32))
            .collect::<Result<_, _>>()?,
        (format, bits) => bail!("unsupported WAV sample format {format:?} at {bits} bits"),
    };

    Ok(AudioBuffer::new(samples, spec.sample_rate, spec.channels)?)
}

fn decode_compressed(path: &Path) -> anyhow::Result<AudioBuffer> {
    let file = File::open(path).context("failed to open source file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // No extension hint: the container is detected from its content.
    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("failed to probe compressed format")?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| anyhow!("no supported audio track found"))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("failed to create decoder")?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(symphonia::core::errors::Error::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                tracing::debug!("Skipping undecodable packet: {e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        sample_rate.get_or_insert(spec.rate);
        channels.get_or_insert(spec.channels.count());

        let needed = decoded.capacity() * spec.channels.count();
        if sample_buf.as_ref().map_or(true, |b| b.capacity() < needed) {
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }
        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(buf.samples());
        }
    }

    let sample_rate = sample_rate.ok_or_else(|| anyhow!("unknown sample rate"))?;
    let channels = channels.ok_or_else(|| anyhow!("unknown channel layout"))?;
    let channels = u16::try_from(channels).context("too many channels")?;

    let samples = interleaved.into_iter().map(quantize_f32).collect();
    Ok(AudioBuffer::new(samples, sample_rate, channels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_saturates() {
        assert_eq!(quantize_f32(2.0), 32767);
        assert_eq!(quantize_f32(-2.0), -32768);
        assert_eq!(quantize_f32(1.0), 32767);
        assert_eq!(quantize_f32(-1.0), -32768);
    }

    #[test]
    fn test_quantize_in_range() {
        assert_eq!(quantize_f32(0.0), 0);
        assert_eq!(quantize_f32(0.5), 16384);
        assert_eq!(quantize_f32(-0.5), -16384);
    }

    #[test]
    fn test_quantize_nan_is_silence() {
        assert_eq!(quantize_f32(f32::NAN), 0);
    }

    #[test]
    fn test_decode_order_is_wav_first() {
        assert_eq!(
            SourceFormat::DECODE_ORDER,
            [SourceFormat::LinearPcm, SourceFormat::CompressedFloat]
        );
    }
}
