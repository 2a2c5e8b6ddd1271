//! Input checks run before the pipeline starts.

use anyhow::Result;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Problem with one path, or None if it is a readable regular file.
pub fn check_path(path: &Path) -> Option<String> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        _ => return Some(format!("Invalid File Path: {}", path.display())),
    }
    if let Err(e) = File::open(path) {
        return Some(format!("Cannot Read File: {} ({})", path.display(), e));
    }
    None
}

/// Every path must be an existing, readable regular file. All problems are reported together.
pub fn validate_paths(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        anyhow::bail!("No file path provided.");
    }
    let problems: Vec<String> = paths
        .iter()
        .filter_map(|p| check_path(p))
        .map(|msg| format!("\t{msg}"))
        .collect();
    if problems.is_empty() {
        return Ok(());
    }
    anyhow::bail!(
        "There were one or more errors with the input:\n{}",
        problems.join("\n")
    )
}
