//! Single-file denoising pipeline: decode, process, write.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use nsclean_common::clock::{realtime_factor, Stopwatch};
use nsclean_common::error::DenoiseResult;
use nsclean_common::level::SuppressionLevel;
use nsclean_pcm_io::{normalize, write_output, NormalizedAudio, PcmEncoder, SourceFormat, WavEncoder};

use crate::backend::BackendKind;
use crate::orchestrator::process;

/// Settings for one denoising run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenoiseOptions {
    pub level: SuppressionLevel,
    pub backend: BackendKind,
}

/// Summary of one file run.
#[derive(Debug, Clone, Serialize)]
pub struct DenoiseReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: SourceFormat,
    pub sample_rate: u32,
    pub channels: u16,
    pub frame_len: usize,
    pub frame_count: usize,
    pub trailing_samples: usize,
    pub frames_written: u64,
    pub level: SuppressionLevel,
    pub backend: BackendKind,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

/// Denoise `input` and write a 16-bit WAV to `output`.
///
/// Nothing is written unless decoding and processing both succeed; an empty
/// source fails with `DenoiseError::EmptyBuffer` and leaves no file.
pub fn denoise_file(
    input: &Path,
    output: &Path,
    options: &DenoiseOptions,
) -> DenoiseResult<DenoiseReport> {
    denoise_file_with(input, output, options, &WavEncoder)
}

/// [`denoise_file`] with an explicit output encoder.
pub fn denoise_file_with(
    input: &Path,
    output: &Path,
    options: &DenoiseOptions,
    encoder: &dyn PcmEncoder,
) -> DenoiseResult<DenoiseReport> {
    let started_at = Utc::now();
    let stopwatch = Stopwatch::start();

    let NormalizedAudio { mut buffer, format } = normalize(input)?;

    let backend = options.backend.instantiate();
    let geometry = match process(&mut buffer, backend.as_ref(), options.level) {
        Ok(report) => report.geometry,
        Err(e) => {
            if e.is_nothing_to_do() {
                tracing::warn!(path = %input.display(), "Source has no samples; no output written");
            }
            return Err(e);
        }
    };

    let frames_written = write_output(output, &buffer, encoder)?;

    let elapsed = stopwatch.elapsed();
    let elapsed_ms = stopwatch.elapsed_ms();
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        elapsed_ms,
        realtime = realtime_factor(buffer.duration_secs(), elapsed).unwrap_or(f64::INFINITY),
        "Denoised file"
    );

    Ok(DenoiseReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        format,
        sample_rate: buffer.sample_rate(),
        channels: buffer.channel_count(),
        frame_len: geometry.frame_len,
        frame_count: geometry.frame_count,
        trailing_samples: geometry.trailing_samples,
        frames_written,
        level: options.level,
        backend: options.backend,
        started_at,
        elapsed_ms,
    })
}
