//! Source tagging and column-union concatenation.
//!
//! Datasets are merged by an explicit schema-union step: the combined
//! header is the union of all input headers in order of first appearance,
//! and rows from a dataset lacking a column get the missing marker for it.

use thiserror::Error;

use crate::models::Dataset;

/// Name of the synthetic provenance column.
pub const SOURCE_COLUMN: &str = "source_file";

/// Marker written for cells whose column is absent from the source dataset.
pub const MISSING_VALUE: &str = "";

/// The input file already carries a column named `source_file`.
#[derive(Debug, Error)]
#[error("cannot insert column \"source_file\": column already exists")]
pub struct DuplicateSourceColumn;

/// Prepend the provenance column, holding `file_name` for every row.
pub fn tag_with_source(
    mut dataset: Dataset,
    file_name: &str,
) -> Result<Dataset, DuplicateSourceColumn> {
    if dataset.columns.iter().any(|c| c == SOURCE_COLUMN) {
        return Err(DuplicateSourceColumn);
    }

    dataset.columns.insert(0, SOURCE_COLUMN.to_string());
    for row in &mut dataset.rows {
        row.insert(0, file_name.to_string());
    }

    Ok(dataset)
}

/// Concatenate datasets by column-name union.
///
/// Column order is first appearance across the inputs; row order is the
/// input order, preserving each dataset's internal row order.
pub fn merge(datasets: &[Dataset], missing_value: &str) -> Dataset {
    let mut columns: Vec<String> = Vec::new();
    for dataset in datasets {
        for column in &dataset.columns {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let total_rows: usize = datasets.iter().map(Dataset::row_count).sum();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(total_rows);

    for dataset in datasets {
        // Position of each combined column within this dataset, if present.
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|column| dataset.columns.iter().position(|c| c == column))
            .collect();

        for row in &dataset.rows {
            rows.push(
                positions
                    .iter()
                    .map(|position| match position {
                        Some(index) => row[*index].clone(),
                        None => missing_value.to_string(),
                    })
                    .collect(),
            );
        }
    }

    Dataset::new(columns, rows)
}
