//! Show decoded format, duration, and frame geometry.

use std::path::PathBuf;

use nsclean_engine::FrameGeometry;
use nsclean_pcm_io::normalize;

pub fn run(input: PathBuf) -> anyhow::Result<()> {
    let audio = normalize(&input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let buffer = &audio.buffer;

    println!("File: {}", input.display());
    println!("  Format: {}", audio.format.name());
    println!("  Sample rate: {} Hz", buffer.sample_rate());
    println!("  Channels: {}", buffer.channel_count());
    println!(
        "  Duration: {:.2}s ({} samples per channel)",
        buffer.duration_secs(),
        buffer.frames()
    );

    match FrameGeometry::new(
        buffer.sample_rate(),
        usize::from(buffer.channel_count()),
        buffer.total_sample_count(),
    ) {
        Ok(geometry) => {
            println!(
                "  Frames: {} x {} samples",
                geometry.frame_count, geometry.frame_len
            );
            println!(
                "  Trailing samples (left unprocessed): {}",
                geometry.trailing_samples
            );
        }
        Err(e) => println!("  Frames: cannot be processed ({e})"),
    }

    Ok(())
}
