//! Imputation and feature/label separation
//!
//! Missing feature cells become `0.0`, the incidental index column is
//! dropped, and the remaining table is split into a feature matrix in
//! `FEATURE_COLUMNS` order and a 0/1 label vector.

use ndarray::{Array1, Array2};

use crate::dataset::loader::RawTable;
use crate::errors::{Result, ServiceError};
use crate::types::{FEATURE_COLUMNS, FEATURE_COUNT, LABEL_COLUMN};

/// Header names an on-disk pandas index column can carry
pub const INDEX_COLUMN_NAMES: [&str; 2] = ["", "Unnamed: 0"];

/// Constant substituted for missing feature values
pub const FILL_VALUE: f64 = 0.0;

/// Feature matrix and labels ready for splitting
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    pub features: Array2<f64>,
    pub labels: Array1<usize>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn is_missing(cell: &str) -> bool {
    matches!(
        cell.trim(),
        "" | "NA" | "NaN" | "nan" | "null" | "NULL" | "None"
    )
}

/// Consume a raw table and produce the training set.
pub fn preprocess(table: RawTable) -> Result<TrainingSet> {
    let source = table.source.display().to_string();

    let index_col = INDEX_COLUMN_NAMES
        .iter()
        .find_map(|name| table.column_index(name))
        .ok_or_else(|| {
            ServiceError::SchemaError(format!(
                "index column ('Unnamed: 0') not found in {}",
                source
            ))
        })?;

    let mut feature_cols = [0usize; FEATURE_COUNT];
    for (slot, name) in feature_cols.iter_mut().zip(FEATURE_COLUMNS.iter()) {
        *slot = table
            .column_index(name)
            .filter(|&idx| idx != index_col)
            .ok_or_else(|| {
                ServiceError::SchemaError(format!("feature column '{}' not found in {}", name, source))
            })?;
    }

    let label_col = table.column_index(LABEL_COLUMN).ok_or_else(|| {
        ServiceError::SchemaError(format!("label column '{}' not found in {}", LABEL_COLUMN, source))
    })?;

    if table.rows.is_empty() {
        return Err(ServiceError::EmptyDataset { path: source });
    }

    let n_rows = table.rows.len();
    let mut features = Array2::<f64>::zeros((n_rows, FEATURE_COUNT));
    let mut labels = Array1::<usize>::zeros(n_rows);

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (feat_idx, &col) in feature_cols.iter().enumerate() {
            let cell = row[col].as_str();
            features[[row_idx, feat_idx]] = if is_missing(cell) {
                FILL_VALUE
            } else {
                cell.trim().parse::<f64>().map_err(|_| {
                    ServiceError::DatasetError(format!(
                        "row {}: column '{}' has non-numeric value '{}'",
                        row_idx + 1,
                        FEATURE_COLUMNS[feat_idx],
                        cell
                    ))
                })?
            };
        }

        labels[row_idx] = parse_label(&row[label_col]).ok_or_else(|| {
            ServiceError::DatasetError(format!(
                "row {}: '{}' must be 0 or 1, got '{}'",
                row_idx + 1,
                LABEL_COLUMN,
                row[label_col]
            ))
        })?;
    }

    Ok(TrainingSet { features, labels })
}

fn parse_label(cell: &str) -> Option<usize> {
    let value: f64 = cell.trim().parse().ok()?;
    if value == 0.0 {
        Some(0)
    } else if value == 1.0 {
        Some(1)
    } else {
        None
    }
}
