use std::path::{Path, PathBuf};

use nsclean_common::error::{DenoiseError, DenoiseResult};
use nsclean_common::level::SuppressionLevel;
use nsclean_engine::pipeline::denoise_file_with;
use nsclean_engine::{denoise_file, BackendKind, DenoiseOptions};
use nsclean_pcm_io::{AudioBuffer, PcmEncoder, SourceFormat};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nsclean_test_pipeline_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn write_pcm16(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("fixture wav should open");
    for &s in samples {
        writer.write_sample(s).expect("fixture sample should write");
    }
    writer.finalize().expect("fixture wav should finalize");
}

fn read_pcm16(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let reader = hound::WavReader::open(path).expect("output wav should open");
    let spec = reader.spec();
    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .expect("output samples should decode");
    (spec, samples)
}

#[test]
fn stereo_silence_round_trips_through_files() {
    let dir = scratch_dir("silence");
    let input = dir.join("silence.wav");
    let output = dir.join("silence_out.wav");
    write_pcm16(&input, 16000, 2, &[0; 1600]);

    let report = denoise_file(&input, &output, &DenoiseOptions::default()).unwrap();

    assert_eq!(report.format, SourceFormat::LinearPcm);
    assert_eq!(report.frame_len, 160);
    assert_eq!(report.frame_count, 5);
    assert_eq!(report.trailing_samples, 0);
    assert_eq!(report.frames_written, 800);

    let (spec, samples) = read_pcm16(&output);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(samples.len(), 1600);
    assert!(samples.iter().all(|&s| s == 0));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn passthrough_preserves_samples_and_trailing_remainder() {
    let dir = scratch_dir("passthrough");
    let input = dir.join("mono.wav");
    let output = dir.join("mono_out.wav");
    let samples: Vec<i16> = (0..8_123).map(|i| ((i * 37) % 2001 - 1000) as i16).collect();
    write_pcm16(&input, 8000, 1, &samples);

    let options = DenoiseOptions {
        level: SuppressionLevel::VeryHigh,
        backend: BackendKind::Passthrough,
    };
    let report = denoise_file(&input, &output, &options).unwrap();

    assert_eq!(report.frame_len, 80);
    assert_eq!(report.frame_count, 101);
    assert_eq!(report.trailing_samples, 43);
    assert_eq!(read_pcm16(&output).1, samples);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn degenerate_rate_fails_without_output() {
    let dir = scratch_dir("degenerate");
    let input = dir.join("slow.wav");
    let output = dir.join("slow_out.wav");
    write_pcm16(&input, 50, 1, &[1, 2, 3, 4]);

    let err = denoise_file(&input, &output, &DenoiseOptions::default()).unwrap_err();

    assert!(matches!(err, DenoiseError::Geometry { sample_rate: 50 }));
    assert!(!output.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_source_fails_without_output() {
    let dir = scratch_dir("unreadable");
    let input = dir.join("broken.wav");
    let output = dir.join("broken_out.wav");
    std::fs::write(&input, b"RIFF but not really").unwrap();

    let err = denoise_file(&input, &output, &DenoiseOptions::default()).unwrap_err();

    assert!(matches!(err, DenoiseError::Read { .. }));
    assert!(!output.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_source_fails_without_output() {
    let dir = scratch_dir("empty");
    let input = dir.join("empty.wav");
    let output = dir.join("empty_out.wav");
    write_pcm16(&input, 16000, 1, &[]);

    let err = denoise_file(&input, &output, &DenoiseOptions::default()).unwrap_err();

    assert!(err.is_nothing_to_do());
    assert_eq!(err.stage(), "process");
    assert!(!output.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

struct TruncatingEncoder;

impl PcmEncoder for TruncatingEncoder {
    fn encode(&self, _path: &Path, buffer: &AudioBuffer) -> DenoiseResult<u64> {
        Ok(buffer.frames() as u64 / 2)
    }
}

#[test]
fn truncated_write_is_reported() {
    let dir = scratch_dir("truncated");
    let input = dir.join("voice.wav");
    let output = dir.join("voice_out.wav");
    write_pcm16(&input, 16000, 1, &[0; 320]);

    let err =
        denoise_file_with(&input, &output, &DenoiseOptions::default(), &TruncatingEncoder)
            .unwrap_err();

    match err {
        DenoiseError::Write { path, message } => {
            assert_eq!(path, output);
            assert_eq!(message, "wrote 160 of 320 frames");
        }
        other => panic!("expected write error, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn report_serializes_to_json() {
    let dir = scratch_dir("report");
    let input = dir.join("tone.wav");
    let output = dir.join("tone_out.wav");
    write_pcm16(&input, 16000, 1, &[0; 480]);

    let report = denoise_file(&input, &output, &DenoiseOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["format"], "linear-pcm");
    assert_eq!(json["level"], "moderate");
    assert_eq!(json["backend"], "stationary");
    assert_eq!(json["frame_count"], 3);

    let _ = std::fs::remove_dir_all(&dir);
}
