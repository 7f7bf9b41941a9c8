//! Delimited-text export of shaped frames.

use indexmap::IndexMap;

use crate::error::{HopeError, Result};
use crate::frame::Frame;

/// Ordered column subset with the header each column is written under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportColumns {
    mapping: IndexMap<String, String>,
}

impl ExportColumns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export `name` under its own name.
    pub fn column(mut self, name: &str) -> Self {
        self.mapping.insert(name.to_string(), name.to_string());
        self
    }

    /// Output headers in order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.mapping.values().map(|s| s.as_str())
    }

    pub fn mapping(&self) -> &IndexMap<String, String> {
        &self.mapping
    }
}

/// Serialize the selected columns of `frame` as UTF-8 CSV.
///
/// The output has a header row, no index column, and standard quoting.
/// The same frame always produces the same bytes.
pub fn to_csv_bytes(frame: &Frame, columns: &ExportColumns) -> Result<Vec<u8>> {
    let selected = frame.select(columns.mapping())?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(selected.columns())?;
    for row in selected.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_field()))?;
    }

    writer
        .into_inner()
        .map_err(|e| HopeError::Export(e.to_string()))
}
