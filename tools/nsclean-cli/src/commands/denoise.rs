//! Denoise a single recording.

use std::path::PathBuf;

use nsclean_common::level::SuppressionLevel;
use nsclean_engine::{denoise_file, BackendKind, DenoiseOptions};
use nsclean_pcm_io::paths::output_path_for;

pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    level: SuppressionLevel,
    backend: BackendKind,
    suffix: &str,
    json: bool,
) -> anyhow::Result<()> {
    let output_path = output.unwrap_or_else(|| output_path_for(&input, suffix));
    let options = DenoiseOptions { level, backend };

    let report = match denoise_file(&input, &output_path, &options) {
        Ok(report) => report,
        Err(e) if e.is_nothing_to_do() => {
            println!("Nothing to do: {} has no samples", input.display());
            return Ok(());
        }
        Err(e) => {
            return Err(anyhow::anyhow!(
                "Failed to denoise {} ({} stage): {e}",
                input.display(),
                e.stage()
            ))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Denoised: {}", input.display());
    println!("  Output: {}", report.output.display());
    println!(
        "  Audio: {} Hz, {} channel(s), {} frames written",
        report.sample_rate, report.channels, report.frames_written
    );
    println!(
        "  Frames: {} x {} samples ({} trailing samples kept as-is)",
        report.frame_count, report.frame_len, report.trailing_samples
    );
    println!("  Level: {} ({})", report.level, report.backend);
    println!("  Time interval: {} ms", report.elapsed_ms);

    Ok(())
}
