//! Console and JSON report generation.
//!
//! The console summary is informational and mirrors the tool's own
//! vocabulary; the JSON report is the serialized [`Report`] for scripting.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Report, RunOutcome};

/// Render the console summary block.
pub fn generate_text_summary(report: &Report) -> String {
    let mut output = String::new();

    match &report.outcome {
        RunOutcome::NoInputFiles => {
            output.push_str(&format!(
                "No CSV files found in {}\n",
                report.metadata.input_dir
            ));
        }
        RunOutcome::NothingReadable => {
            output.push_str("No files could be read successfully. See errors below:\n");
            output.push_str(&generate_failure_list(report));
        }
        RunOutcome::Written { rows, columns } => {
            output.push_str(&format!(
                "✅ Saved concatenated CSV to: {}\n",
                report.metadata.output_path
            ));
            output.push_str(&format!(
                "   Rows: {} | Columns: {}\n",
                group_digits(*rows),
                columns
            ));

            if !report.failures.is_empty() {
                output.push_str("\nSome files were skipped due to read errors:\n");
                output.push_str(&generate_failure_list(report));
            }
        }
    }

    output
}

/// One indented line per failed file.
fn generate_failure_list(report: &Report) -> String {
    let mut list = String::new();
    for failure in &report.failures {
        list.push_str(&format!("  - {}: {}\n", failure.file, failure.error));
    }
    list
}

/// Format a count with thousands separators (12345 -> "12,345").
fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write a JSON report to a file.
pub fn write_json_report(report: &Report, path: &Path) -> Result<()> {
    let content = generate_json_report(report)?;
    fs::write(path, content)
        .with_context(|| format!("writing run report to {}", path.display()))?;
    Ok(())
}
