//! Raw tables and the metadata recorded when they are loaded.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has just been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Cell spellings read as missing, matching the default NA set of
/// common dataframe CSV readers.
pub const NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parsed tabular data, every cell kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// True when there is nothing to chart: no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the index of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Check if a value represents a missing/null value.
    ///
    /// Blank cells and the exact spellings in [`NULL_VALUES`] are missing.
    /// Matching is case-sensitive, so `NONE` or `Na` stay text.
    pub fn is_null_value(value: &str) -> bool {
        value.trim().is_empty() || NULL_VALUES.contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = DataTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let table = DataTable::new(vec!["year".into(), "source".into()], Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.column_index("source"), Some(1));
    }

    #[test]
    fn test_null_values_are_case_sensitive() {
        assert!(DataTable::is_null_value("  "));
        assert!(DataTable::is_null_value("None"));
        assert!(DataTable::is_null_value("#N/A"));
        assert!(!DataTable::is_null_value("NONE"));
        assert!(!DataTable::is_null_value("nil"));
        assert!(!DataTable::is_null_value("Na"));
        assert!(!DataTable::is_null_value("Nullsoft Survey"));
    }

    #[test]
    fn test_short_rows_read_as_blank() {
        let table = DataTable::new(
            vec!["year".into(), "pct".into()],
            vec![vec!["2003".into(), "30".into()], vec!["2016".into()]],
        );
        let index = table.column_index("pct").unwrap();
        assert_eq!(table.column_values(index).collect::<Vec<_>>(), vec!["30", ""]);
        assert_eq!(table.get(1, 1), None);
    }
}
