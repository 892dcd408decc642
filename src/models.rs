//! Data models for the concatenation run.
//!
//! This module contains the core data structures used throughout the
//! application for representing parsed tables, per-file outcomes, and the
//! final run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed tabular dataset: an ordered header plus rows.
///
/// Invariant: every row holds exactly one cell per header column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Row-major cell values.
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates a dataset from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Number of data rows (the header is not a row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// A file that could not be read, with the reported reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFailure {
    /// File name (not the full path).
    pub file: String,
    /// Error message from the last attempted encoding.
    pub error: String,
}

/// Terminal outcome of a run.
///
/// `NoInputFiles` and `NothingReadable` both mean no output file was
/// written, but callers must be able to tell "nothing to do" apart from
/// "everything failed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The combined CSV was written.
    Written { rows: usize, columns: usize },
    /// The input directory contained no candidate files.
    NoInputFiles,
    /// Candidate files existed but none could be read.
    NothingReadable,
}

/// Metadata about a concatenation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Input directory that was scanned.
    pub input_dir: String,
    /// Output path the combined CSV was (or would have been) written to.
    pub output_path: String,
    /// Date and time the run started.
    pub run_date: DateTime<Utc>,
    /// Number of candidate files found.
    pub files_found: usize,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: RunMetadata,
    /// File names that were read successfully, in processing order.
    pub successes: Vec<String>,
    /// Files that were skipped, with their error messages.
    pub failures: Vec<ReadFailure>,
    /// Terminal outcome.
    pub outcome: RunOutcome,
}
