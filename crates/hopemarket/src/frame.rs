//! Typed, immutable tables produced by shaping.
//!
//! Every operation returns a new [`Frame`]; nothing is modified in place.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{HopeError, Result};
use crate::input::DataTable;

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a cell from raw file text. NA-like values become [`Cell::Missing`].
    pub fn from_raw(value: &str) -> Self {
        if DataTable::is_null_value(value) {
            Cell::Missing
        } else {
            Cell::Text(value.to_string())
        }
    }

    /// Numeric coercion: unparseable or non-finite values become missing.
    pub fn coerce_number(&self) -> Cell {
        match self {
            Cell::Number(n) if n.is_finite() => Cell::Number(*n),
            Cell::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Cell::Number(n),
                _ => Cell::Missing,
            },
            _ => Cell::Missing,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Render the cell the way it is written to a delimited file.
    ///
    /// Integral numbers drop the fraction (`2016`, not `2016.0`); other
    /// numbers use the shortest representation that parses back exactly.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// An ordered set of named columns over rows of [`Cell`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Create a frame. Rows shorter than the column list are padded with missing cells.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Lift a raw text table into a frame of text and missing cells.
    pub fn from_table(table: &DataTable) -> Self {
        let rows = table
            .rows
            .iter()
            .map(|row| row.iter().map(|v| Cell::from_raw(v)).collect())
            .collect();
        Self::new(table.headers.clone(), rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Names from `required` that this frame lacks.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Cell at `row` in column `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let index = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// All cells of one column.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Numeric view of a column; non-numeric cells are `None`.
    pub fn numbers(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.column(name)
            .map(|cells| cells.into_iter().map(Cell::as_number).collect())
    }

    /// Field view of a column, as it would be exported.
    pub fn fields(&self, name: &str) -> Option<Vec<String>> {
        self.column(name)
            .map(|cells| cells.into_iter().map(Cell::to_field).collect())
    }

    /// Rename columns; entries naming absent columns are ignored.
    pub fn rename(&self, mapping: &[(&str, &str)]) -> Frame {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                mapping
                    .iter()
                    .find(|(from, _)| *from == c.as_str())
                    .map(|(_, to)| to.to_string())
                    .unwrap_or_else(|| c.clone())
            })
            .collect();
        Frame {
            columns,
            rows: self.rows.clone(),
        }
    }

    /// Coerce one column to numbers. A frame without the column is returned unchanged.
    pub fn coerce_numeric(&self, name: &str) -> Frame {
        let Some(index) = self.column_index(name) else {
            return self.clone();
        };
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row[index] = row[index].coerce_number();
                row
            })
            .collect();
        Frame {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Keep rows that have a value in every named column.
    pub fn drop_missing(&self, names: &[&str]) -> Frame {
        let indexes: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        self.filter_rows(|row| indexes.iter().all(|&i| !row[i].is_missing()))
    }

    /// Keep rows for which `keep` returns true.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[Cell]) -> bool) -> Frame {
        Frame {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row.as_slice()))
                .cloned()
                .collect(),
        }
    }

    /// Add a column, or replace it if the name already exists.
    ///
    /// `values` shorter than the frame are padded with missing cells.
    pub fn with_column(&self, name: &str, values: Vec<Cell>) -> Frame {
        let mut columns = self.columns.clone();
        let index = match self.column_index(name) {
            Some(i) => i,
            None => {
                columns.push(name.to_string());
                columns.len() - 1
            }
        };

        let mut values = values.into_iter();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(columns.len(), Cell::Missing);
                row[index] = values.next().unwrap_or(Cell::Missing);
                row
            })
            .collect();

        Frame { columns, rows }
    }

    /// Stable sort ascending by a numeric column; missing values sort last.
    pub fn sort_by_number(&self, name: &str) -> Frame {
        let Some(index) = self.column_index(name) else {
            return self.clone();
        };
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| match (a[index].as_number(), b[index].as_number()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Frame {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Stable sort by a key computed from each row.
    pub fn sort_by_key<K: Ord>(&self, mut key: impl FnMut(&[Cell]) -> K) -> Frame {
        let mut rows = self.rows.clone();
        rows.sort_by_cached_key(|row| key(row.as_slice()));
        Frame {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Project onto an ordered subset of columns, renaming each to its mapped header.
    pub fn select(&self, mapping: &IndexMap<String, String>) -> Result<Frame> {
        let mut indexes = Vec::with_capacity(mapping.len());
        let mut missing = Vec::new();
        for from in mapping.keys() {
            match self.column_index(from) {
                Some(i) => indexes.push(i),
                None => missing.push(from.as_str()),
            }
        }
        if !missing.is_empty() {
            return Err(HopeError::missing_columns("selection", &missing));
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indexes.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Frame {
            columns: mapping.values().cloned().collect(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        let table = DataTable::new(
            vec!["year".into(), "pct".into(), "source".into()],
            vec![
                vec!["2016".into(), "20".into(), "Gallup".into()],
                vec!["2003".into(), "n/a".into(), "Gallup".into()],
                vec!["twenty".into(), "12".into(), "".into()],
                vec!["2007".into(), "25.5".into(), "Gallup".into()],
            ],
        );
        Frame::from_table(&table)
    }

    #[test]
    fn test_from_table_marks_missing() {
        let f = frame();
        assert_eq!(f.cell(1, "pct"), Some(&Cell::Missing));
        assert_eq!(f.cell(2, "source"), Some(&Cell::Missing));
        assert_eq!(f.cell(0, "source"), Some(&Cell::Text("Gallup".into())));
    }

    #[test]
    fn test_coerce_turns_garbage_into_missing() {
        let f = frame().coerce_numeric("year");
        assert_eq!(
            f.numbers("year").unwrap(),
            vec![Some(2016.0), Some(2003.0), None, Some(2007.0)]
        );
    }

    #[test]
    fn test_coerce_rejects_non_finite() {
        assert_eq!(Cell::Text("inf".into()).coerce_number(), Cell::Missing);
        assert_eq!(Cell::Text(" 7.5 ".into()).coerce_number(), Cell::Number(7.5));
    }

    #[test]
    fn test_rename_ignores_absent_columns() {
        let f = frame().rename(&[("year", "Year"), ("nope", "Nope")]);
        assert_eq!(f.columns(), &["Year", "pct", "source"]);
    }

    #[test]
    fn test_drop_missing_and_sort() {
        let f = frame()
            .coerce_numeric("year")
            .coerce_numeric("pct")
            .drop_missing(&["year", "pct"])
            .sort_by_number("year");
        assert_eq!(f.numbers("year").unwrap(), vec![Some(2007.0), Some(2016.0)]);
    }

    #[test]
    fn test_sort_by_number_is_stable() {
        let f = Frame::new(
            vec!["k".into(), "v".into()],
            vec![
                vec![Cell::Number(2.0), Cell::Text("a".into())],
                vec![Cell::Number(1.0), Cell::Text("b".into())],
                vec![Cell::Number(2.0), Cell::Text("c".into())],
            ],
        )
        .sort_by_number("k");
        assert_eq!(f.fields("v").unwrap(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_with_column_appends_and_replaces() {
        let f = frame().with_column("flag", vec![Cell::Number(1.0)]);
        assert_eq!(f.columns().len(), 4);
        assert_eq!(f.cell(0, "flag"), Some(&Cell::Number(1.0)));
        assert_eq!(f.cell(3, "flag"), Some(&Cell::Missing));

        let f = f.with_column("flag", vec![Cell::Number(2.0); 4]);
        assert_eq!(f.columns().len(), 4);
        assert_eq!(f.cell(3, "flag"), Some(&Cell::Number(2.0)));
    }

    #[test]
    fn test_select_reorders_and_renames() {
        let mut mapping = IndexMap::new();
        mapping.insert("source".to_string(), "Source".to_string());
        mapping.insert("year".to_string(), "Year".to_string());

        let f = frame().select(&mapping).unwrap();
        assert_eq!(f.columns(), &["Source", "Year"]);
        assert_eq!(f.fields("Year").unwrap()[0], "2016");
    }

    #[test]
    fn test_select_reports_missing_columns() {
        let mut mapping = IndexMap::new();
        mapping.insert("AgeGroup".to_string(), "AgeGroup".to_string());

        match frame().select(&mapping) {
            Err(HopeError::MissingColumns { expected, .. }) => {
                assert_eq!(expected, vec!["AgeGroup"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_number_fields() {
        assert_eq!(Cell::Number(2016.0).to_field(), "2016");
        assert_eq!(Cell::Number(7.55).to_field(), "7.55");
        assert_eq!(Cell::Number(-0.5).to_field(), "-0.5");
        assert_eq!(Cell::Missing.to_field(), "");
    }
}
