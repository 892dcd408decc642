//! Robust CSV reading.
//!
//! A file of unknown encoding is read by trying a fixed list of candidate
//! encodings in priority order. For each candidate the raw bytes are
//! decoded, the field delimiter is inferred from the decoded text, and the
//! text is parsed as delimited rows with the first row as header. The first
//! candidate for which all three steps succeed wins. When every candidate
//! fails, the error from the last attempt is reported and earlier errors
//! are discarded.

pub mod encoding;
pub mod sniff;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::Dataset;
use encoding::TextEncoding;

/// Why a single encoding attempt failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("invalid byte sequence for {encoding}")]
    Decode { encoding: &'static str },

    #[error("file is empty")]
    Empty,

    #[error("could not determine field delimiter")]
    NoDelimiter,

    #[error("{0}")]
    Parse(#[from] csv::Error),
}

/// Failure to read an input file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No encoding/delimiter combination succeeded. Carries the error from
    /// the last attempted candidate.
    #[error("no supported encoding could read {path}: {error} (last tried {encoding})")]
    Unreadable {
        path: PathBuf,
        encoding: &'static str,
        error: AttemptError,
    },
}

/// Tunables for the reader.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Recognized field delimiters, tried during inference.
    pub delimiters: Vec<u8>,
    /// Number of lines sampled for delimiter inference.
    pub sniff_lines: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiters: sniff::DEFAULT_DELIMITERS.to_vec(),
            sniff_lines: sniff::DEFAULT_SNIFF_LINES,
        }
    }
}

/// Read a delimited text file into a [`Dataset`], trying each candidate
/// encoding in order.
pub fn read_dataset(path: &Path, options: &ReaderOptions) -> Result<Dataset, ReadError> {
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut last: Option<(TextEncoding, AttemptError)> = None;

    for &candidate in encoding::CANDIDATES.iter() {
        match parse_with_encoding(&bytes, candidate, options) {
            Ok(dataset) => {
                debug!(
                    "read {} as {}: {} rows, {} columns",
                    path.display(),
                    candidate.name(),
                    dataset.row_count(),
                    dataset.column_count()
                );
                return Ok(dataset);
            }
            Err(error) => {
                debug!("{} failed as {}: {}", path.display(), candidate.name(), error);
                last = Some((candidate, error));
            }
        }
    }

    let (candidate, error) = last.expect("encoding candidate list is never empty");
    Err(ReadError::Unreadable {
        path: path.to_path_buf(),
        encoding: candidate.name(),
        error,
    })
}

/// One attempt: decode, sniff the delimiter, parse with a header row.
fn parse_with_encoding(
    bytes: &[u8],
    candidate: TextEncoding,
    options: &ReaderOptions,
) -> Result<Dataset, AttemptError> {
    let text = candidate.decode(bytes).ok_or(AttemptError::Decode {
        encoding: candidate.name(),
    })?;

    if text.lines().all(|line| line.trim().is_empty()) {
        return Err(AttemptError::Empty);
    }

    let delimiter = sniff::sniff_delimiter(&text, &options.delimiters, options.sniff_lines)
        .ok_or(AttemptError::NoDelimiter)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = dedupe_headers(reader.headers()?);

    // The reader is strict about per-row field counts: a row that does not
    // match the header width fails this attempt.
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Dataset::new(columns, rows))
}

/// Disambiguate duplicate header names by suffixing (`x`, `x.1`, `x.2`, …)
/// so that merging by column name stays well-defined.
fn dedupe_headers(record: &csv::StringRecord) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut columns: Vec<String> = Vec::with_capacity(record.len());

    for name in record.iter() {
        let seen = counts.entry(name).or_insert(0);
        let mut column = if *seen == 0 {
            name.to_string()
        } else {
            format!("{}.{}", name, seen)
        };
        *seen += 1;

        // A literal "x.1" header may already occupy the suffixed name.
        while columns.contains(&column) {
            let seen = counts.entry(name).or_insert(0);
            column = format!("{}.{}", name, seen);
            *seen += 1;
        }

        columns.push(column);
    }

    columns
}
