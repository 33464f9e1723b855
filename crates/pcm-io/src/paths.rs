//! Output naming and batch input discovery.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use nsclean_common::error::{DenoiseError, DenoiseResult};

/// Derive the output path for `input`: `<dir>/<stem><suffix><ext>`.
///
/// The input extension is kept as-is even though the output is always
/// written as WAV, so existing tooling keyed on names keeps working.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = input.file_stem() {
        name.push(stem);
    }
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Whether `path` already looks like an output produced with `suffix`.
pub fn is_derived_output(path: &Path, suffix: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(suffix))
}

/// List regular files under `dir` that should be denoised, sorted by path.
///
/// Files that are already outputs (stem ends with `suffix`) and hidden
/// entries are skipped.
pub fn collect_inputs(dir: &Path, recursive: bool, suffix: &str) -> DenoiseResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DenoiseError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut inputs = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let entry = entry?;
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if hidden {
                continue;
            }

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                if recursive {
                    pending.push(path);
                }
            } else if file_type.is_file() && !is_derived_output(&path, suffix) {
                inputs.push(path);
            }
        }
    }

    inputs.sort();
    Ok(inputs)
}
