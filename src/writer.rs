//! Combined CSV output.
//!
//! The output is comma-delimited UTF-8 with a byte-order-mark so that
//! spreadsheet tools pick up the encoding, with a header row and no
//! row-index column.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Dataset;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Write the dataset to `path`, creating parent directories if absent.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }

    let mut file = File::create(path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    file.write_all(UTF8_BOM)
        .with_context(|| format!("writing to {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new().delimiter(b',').from_writer(file);

    writer.write_record(&dataset.columns)?;
    for row in &dataset.rows {
        writer.write_record(row)?;
    }

    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    Ok(())
}
