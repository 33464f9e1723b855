//! Denoise every recording in a directory.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use nsclean_common::error::DenoiseError;
use nsclean_common::level::SuppressionLevel;
use nsclean_engine::{denoise_file, BackendKind, DenoiseOptions};
use nsclean_pcm_io::paths::{collect_inputs, output_path_for};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub async fn run(
    dir: PathBuf,
    recursive: bool,
    jobs: usize,
    level: SuppressionLevel,
    backend: BackendKind,
    suffix: String,
) -> anyhow::Result<()> {
    let inputs = collect_inputs(&dir, recursive, &suffix)
        .map_err(|e| anyhow::anyhow!("Failed to scan {}: {e}", dir.display()))?;

    println!(
        "Denoising {} file(s) in {} (level: {level}, jobs: {jobs})",
        inputs.len(),
        dir.display()
    );
    if inputs.is_empty() {
        return Ok(());
    }

    let options = DenoiseOptions { level, backend };
    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();

    for input in inputs {
        let permit = Arc::clone(&semaphore).acquire_owned().await?;
        let output = output_path_for(&input, &suffix);
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let result = run_guarded(|| denoise_file(&input, &output, &options));
            (input, result)
        });
    }

    let mut succeeded = 0usize;
    let mut skipped = 0usize;
    let mut failed = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        let (input, result) = match joined {
            Ok(finished) => finished,
            Err(e) => {
                tracing::error!("Denoise task was cancelled: {e}");
                println!("  [FAIL] <cancelled task>: {e}");
                failed.push(dir.clone());
                continue;
            }
        };
        let result = match result {
            Ok(result) => result,
            Err(panic) => {
                tracing::error!(path = %input.display(), "Denoise task panicked: {panic}");
                println!("  [FAIL] {} (panicked): {panic}", input.display());
                failed.push(input);
                continue;
            }
        };
        match result {
            Ok(report) => {
                succeeded += 1;
                println!(
                    "  [OK] {} -> {} ({} ms)",
                    input.display(),
                    report.output.display(),
                    report.elapsed_ms
                );
            }
            Err(e @ DenoiseError::Read { .. }) => {
                skipped += 1;
                tracing::warn!(path = %input.display(), "Skipping unreadable file: {e}");
                println!("  [SKIP] {}", input.display());
            }
            Err(e) if e.is_nothing_to_do() => {
                skipped += 1;
                println!("  [SKIP] {} (no samples)", input.display());
            }
            Err(e) => {
                println!("  [FAIL] {} ({} stage): {e}", input.display(), e.stage());
                failed.push(input);
            }
        }
    }

    println!(
        "\n{succeeded} denoised, {skipped} skipped, {} failed.",
        failed.len()
    );

    if failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} file(s) failed to denoise in {}",
            failed.len(),
            dir.display()
        ))
    }
}

/// Run `f`, turning a panic into an error carrying the panic message.
fn run_guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
