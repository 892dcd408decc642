//! The concatenation run.
//!
//! Discovers candidate files, reads each one with the robust reader, tags
//! rows with their source filename, merges the readable datasets by
//! column-name union, and writes the combined CSV. A single file's failure
//! never aborts the run; it is recorded and surfaced in the report.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::merge;
use crate::models::{Dataset, ReadFailure, Report, RunMetadata, RunOutcome};
use crate::reader::{self, ReaderOptions};
use crate::scanner;
use crate::writer;

/// Options for a concatenation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Directory scanned for input files.
    pub input_dir: PathBuf,
    /// Path the combined CSV is written to.
    pub output_path: PathBuf,
    /// Reader tunables (delimiter candidates, sniff sample size).
    pub reader: ReaderOptions,
    /// Whether to show a progress bar over the file loop.
    pub show_progress: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_path: PathBuf::from("output/concatenated.csv"),
            reader: ReaderOptions::default(),
            show_progress: true,
        }
    }
}

/// Run the full concatenation and return the report.
pub fn run(options: &AggregateOptions) -> Result<Report> {
    let started = Instant::now();
    let run_date = Utc::now();

    let files = scanner::discover(&options.input_dir)?;
    info!("found {} candidate files", files.len());

    let mut datasets: Vec<Dataset> = Vec::with_capacity(files.len());
    let mut successes: Vec<String> = Vec::new();
    let mut failures: Vec<ReadFailure> = Vec::new();

    let progress = if options.show_progress && !files.is_empty() {
        println!("Found {} CSV files. Concatenating...", files.len());
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some(ref bar) = progress {
            bar.set_message(file_name.clone());
        }

        match reader::read_dataset(path, &options.reader) {
            Ok(dataset) => match merge::tag_with_source(dataset, &file_name) {
                Ok(tagged) => {
                    datasets.push(tagged);
                    successes.push(file_name);
                }
                Err(err) => {
                    warn!("skipping {}: {}", file_name, err);
                    failures.push(ReadFailure {
                        file: file_name,
                        error: err.to_string(),
                    });
                }
            },
            Err(err) => {
                warn!("skipping {}: {}", file_name, err);
                failures.push(ReadFailure {
                    file: file_name,
                    error: err.to_string(),
                });
            }
        }

        if let Some(ref bar) = progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    // The output file is created only after the full merge succeeds; the
    // two no-output cases stay distinguishable in the report.
    let outcome = if files.is_empty() {
        RunOutcome::NoInputFiles
    } else if datasets.is_empty() {
        RunOutcome::NothingReadable
    } else {
        let combined = merge::merge(&datasets, merge::MISSING_VALUE);
        writer::write_csv(&combined, &options.output_path)?;
        info!(
            "wrote {} rows x {} columns to {}",
            combined.row_count(),
            combined.column_count(),
            options.output_path.display()
        );
        RunOutcome::Written {
            rows: combined.row_count(),
            columns: combined.column_count(),
        }
    };

    Ok(Report {
        metadata: RunMetadata {
            input_dir: options.input_dir.display().to_string(),
            output_path: options.output_path.display().to_string(),
            run_date,
            files_found: files.len(),
            duration_seconds: started.elapsed().as_secs_f64(),
        },
        successes,
        failures,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn options(input: &Path, output: &Path) -> AggregateOptions {
        AggregateOptions {
            input_dir: input.to_path_buf(),
            output_path: output.to_path_buf(),
            reader: ReaderOptions::default(),
            show_progress: false,
        }
    }

    fn read_output(path: &Path) -> String {
        String::from_utf8(fs::read(path).unwrap())
            .unwrap()
            .trim_start_matches('\u{feff}')
            .to_string()
    }

    #[test]
    fn test_mixed_encoding_column_union_scenario() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();

        // a.csv: comma-delimited UTF-8, columns x and y, two rows.
        fs::write(input.join("a.csv"), "x,y\n1,2\n3,4\n").unwrap();
        // b.csv: semicolon-delimited Windows-1252, columns y and z, one row.
        fs::write(input.join("b.csv"), b"y;z\ns\xF8ren;42\n").unwrap();

        let output = dir.path().join("out").join("combined.csv");
        let report = run(&options(&input, &output)).unwrap();

        assert_eq!(report.metadata.files_found, 2);
        assert_eq!(report.successes, vec!["a.csv", "b.csv"]);
        assert!(report.failures.is_empty());
        assert_eq!(report.outcome, RunOutcome::Written { rows: 3, columns: 4 });

        let content = read_output(&output);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "source_file,x,y,z");
        assert_eq!(lines[1], "a.csv,1,2,");
        assert_eq!(lines[2], "a.csv,3,4,");
        assert_eq!(lines[3], "b.csv,,søren,42");
    }

    #[test]
    fn test_empty_input_directory_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();
        let output = dir.path().join("out.csv");

        let report = run(&options(&input, &output)).unwrap();

        assert_eq!(report.outcome, RunOutcome::NoInputFiles);
        assert_eq!(report.metadata.files_found, 0);
        assert!(report.successes.is_empty());
        assert!(report.failures.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_all_unreadable_is_distinct_from_empty() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();

        // Binary blobs with a .csv extension: no candidate encoding parses.
        let blob: &[u8] = &[0x00, 0x01, 0xFF, 0xFE, 0x03, 0x9D, 0x8F, 0x00, 0x10];
        fs::write(input.join("one.csv"), blob).unwrap();
        fs::write(input.join("two.csv"), blob).unwrap();

        let output = dir.path().join("out.csv");
        let report = run(&options(&input, &output)).unwrap();

        assert_eq!(report.outcome, RunOutcome::NothingReadable);
        assert_eq!(report.metadata.files_found, 2);
        assert!(report.successes.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].file, "one.csv");
        assert_eq!(report.failures[1].file, "two.csv");
        assert!(!report.failures[0].error.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_one_bad_file_does_not_abort_the_run() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();

        fs::write(input.join("bad.csv"), b"").unwrap();
        fs::write(input.join("good.csv"), "x\ty\n1\t2\n").unwrap();

        let output = dir.path().join("out.csv");
        let report = run(&options(&input, &output)).unwrap();

        assert_eq!(report.successes, vec!["good.csv"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "bad.csv");
        assert_eq!(report.outcome, RunOutcome::Written { rows: 1, columns: 3 });
        assert!(output.exists());
    }

    #[test]
    fn test_existing_source_file_column_is_a_recorded_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();

        fs::write(input.join("tagged.csv"), "source_file,x\nelsewhere,1\n").unwrap();
        fs::write(input.join("plain.csv"), "x,y\n1,2\n").unwrap();

        let output = dir.path().join("out.csv");
        let report = run(&options(&input, &output)).unwrap();

        assert_eq!(report.successes, vec!["plain.csv"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "tagged.csv");
        assert!(report.failures[0].error.contains("source_file"));
    }

    #[test]
    fn test_rows_follow_sorted_file_order() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();

        // Written out of order; processing must follow filename order.
        fs::write(input.join("b.csv"), "n,m\n3,x\n4,x\n").unwrap();
        fs::write(input.join("a.csv"), "n,m\n1,x\n2,x\n").unwrap();

        let output = dir.path().join("out.csv");
        run(&options(&input, &output)).unwrap();

        let content = read_output(&output);
        let firsts: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(1).unwrap())
            .collect();
        assert_eq!(firsts, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("a.csv"), "x,y\n1,2\n").unwrap();
        fs::write(input.join("b.csv"), b"y;z\nv\xE9lo;9\n").unwrap();

        let output = dir.path().join("out.csv");
        run(&options(&input, &output)).unwrap();
        let first = fs::read(&output).unwrap();

        run(&options(&input, &output)).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }
}
