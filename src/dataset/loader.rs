//! CSV dataset loader

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, ServiceError};

/// Untyped table as read from disk
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Source path, kept for error messages
    pub source: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Read a headered CSV file fully into memory.
///
/// Any read error aborts the load; there is no retry and no partial result.
pub fn load_dataset(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| {
            ServiceError::DatasetError(format!("Failed to open {}: {}", path.display(), e))
        })?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), columns = headers.len(), "Dataset loaded");

    Ok(RawTable {
        source: path.to_path_buf(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_reads_headers_and_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ",Age,Loan_Approval").unwrap();
        writeln!(file, "0,35,1").unwrap();
        writeln!(file, "1,,0").unwrap();

        let table = load_dataset(file.path()).unwrap();
        assert_eq!(table.headers, vec!["", "Age", "Loan_Approval"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1][1], "");
        assert_eq!(table.column_index("Age"), Some(1));
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let err = load_dataset(Path::new("/nonexistent/loans.csv")).unwrap_err();
        assert!(matches!(err, ServiceError::DatasetError(_)));
    }

    #[test]
    fn test_ragged_row_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,2,3").unwrap();

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, ServiceError::CsvError(_)));
    }
}
