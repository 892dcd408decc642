//! Input file discovery.
//!
//! Candidates are the regular files directly inside the input directory
//! whose extension is exactly `csv`. The match is case-sensitive (`.CSV`
//! is not a candidate) and subdirectories are not descended into. The
//! result is sorted lexicographically by filename so that processing order
//! is deterministic.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// File extension accepted for input files.
const CSV_EXTENSION: &str = "csv";

/// List candidate CSV files in `input_dir`, sorted by filename.
pub fn discover(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("listing input directory {}", input_dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("listing input directory {}", input_dir.display()))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(CSV_EXTENSION) {
            debug!("skipping non-csv entry {}", path.display());
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!("found {} candidate files in {}", files.len(), input_dir.display());
    Ok(files)
}
