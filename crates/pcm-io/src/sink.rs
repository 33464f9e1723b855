//! Output encoding with write verification.

use std::path::Path;

use nsclean_common::error::{DenoiseError, DenoiseResult};

use crate::buffer::AudioBuffer;

/// Encodes a canonical buffer into a container file.
pub trait PcmEncoder {
    /// Write `buffer` to `path`, returning the number of frames
    /// (samples per channel) actually written.
    fn encode(&self, path: &Path, buffer: &AudioBuffer) -> DenoiseResult<u64>;
}

/// RIFF/WAV encoder producing 16-bit integer PCM.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl PcmEncoder for WavEncoder {
    fn encode(&self, path: &Path, buffer: &AudioBuffer) -> DenoiseResult<u64> {
        let spec = hound::WavSpec {
            channels: buffer.channel_count(),
            sample_rate: buffer.sample_rate(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)
            .map_err(|e| DenoiseError::write(path, format!("Failed to create WAV: {e}")))?;

        let mut written: u64 = 0;
        for &sample in buffer.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| DenoiseError::write(path, format!("Failed to write sample: {e}")))?;
            written += 1;
        }

        writer
            .finalize()
            .map_err(|e| DenoiseError::write(path, format!("Failed to finalize WAV: {e}")))?;

        Ok(written / u64::from(buffer.channel_count()))
    }
}

/// Encode `buffer` to `path` and verify that every frame was written.
///
/// Returns the number of frames written. A short write is a
/// [`DenoiseError::Write`]; the file is left in place for inspection.
pub fn write_output(
    path: &Path,
    buffer: &AudioBuffer,
    encoder: &dyn PcmEncoder,
) -> DenoiseResult<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| DenoiseError::write(path, format!("Failed to create directory: {e}")))?;
    }

    let expected = buffer.frames() as u64;
    let written = encoder.encode(path, buffer)?;

    if written != expected {
        return Err(DenoiseError::write(
            path,
            format!("wrote {written} of {expected} frames"),
        ));
    }

    tracing::info!(
        path = %path.display(),
        frames = written,
        channels = buffer.channel_count(),
        sample_rate = buffer.sample_rate(),
        "Wrote output audio"
    );

    Ok(written)
}
