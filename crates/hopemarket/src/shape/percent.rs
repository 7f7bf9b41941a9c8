//! Shaping shared by the year-indexed percentage tables.

use tracing::debug;

use super::{SOURCE, YEAR};
use crate::error::{HopeError, Result};
use crate::frame::Frame;
use crate::input::DataTable;

/// Describes one year/percentage/source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentSeries {
    /// Human-readable name used in errors and logs.
    pub name: &'static str,
    /// Metric column as spelled in the source file.
    pub source_column: &'static str,
    /// Canonical metric column after shaping.
    pub metric: &'static str,
}

/// Gallup under-30 lottery participation.
pub const LOTTERY: PercentSeries = PercentSeries {
    name: "lottery participation",
    source_column: "under30_lottery_pct",
    metric: "Under30LotteryPct",
};

/// Under-30 crypto ownership surveys.
pub const CRYPTO: PercentSeries = PercentSeries {
    name: "crypto ownership",
    source_column: "under30_crypto_pct",
    metric: "Under30CryptoPct",
};

/// Share of bitcoin held by the top 0.01% of holders.
pub const CONCENTRATION: PercentSeries = PercentSeries {
    name: "ownership concentration",
    source_column: "top_0_01_pct_ownership",
    metric: "top_0_01_pct_ownership",
};

/// Shape a raw table into `Year, <metric>, Source`, sorted ascending by year.
///
/// Rows whose year or metric does not parse as a number are dropped. An
/// empty table passes through unchanged.
pub fn shape_percent_series(raw: &DataTable, series: &PercentSeries) -> Result<Frame> {
    let frame = Frame::from_table(raw);
    if frame.is_empty() {
        return Ok(frame);
    }

    let frame = frame.rename(&[
        ("year", YEAR),
        (series.source_column, series.metric),
        ("source", SOURCE),
    ]);
    let missing = frame.missing_columns(&[YEAR, series.metric]);
    if !missing.is_empty() {
        return Err(HopeError::MissingColumns {
            dataset: series.name.to_string(),
            expected: missing,
        });
    }

    let before = frame.row_count();
    let frame = frame
        .coerce_numeric(YEAR)
        .coerce_numeric(series.metric)
        .drop_missing(&[YEAR, series.metric])
        .sort_by_number(YEAR);

    debug!(
        series = series.name,
        kept = frame.row_count(),
        dropped = before - frame.row_count(),
        "shaped percent series"
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Cell;

    fn raw(rows: &[(&str, &str, &str)]) -> DataTable {
        DataTable::new(
            vec!["year".into(), "under30_lottery_pct".into(), "source".into()],
            rows.iter()
                .map(|(y, p, s)| vec![y.to_string(), p.to_string(), s.to_string()])
                .collect(),
        )
    }

    #[test]
    fn test_renames_coerces_and_sorts() {
        let table = raw(&[("2016", "20", "Gallup"), ("2003", "31", "Gallup"), ("2007", "26", "Gallup")]);
        let frame = shape_percent_series(&table, &LOTTERY).unwrap();

        assert_eq!(frame.columns(), &[YEAR, "Under30LotteryPct", SOURCE]);
        assert_eq!(frame.fields(YEAR).unwrap(), vec!["2003", "2007", "2016"]);
        assert_eq!(frame.cell(0, "Under30LotteryPct"), Some(&Cell::Number(31.0)));
    }

    #[test]
    fn test_non_numeric_rows_dropped() {
        let table = raw(&[
            ("2003", "31", "Gallup"),
            ("two thousand", "26", "Gallup"),
            ("2016", "about 20", "Gallup"),
            ("", "12", "Gallup"),
        ]);
        let frame = shape_percent_series(&table, &LOTTERY).unwrap();
        assert_eq!(frame.row_count(), 1);
    }

    #[test]
    fn test_source_is_untouched() {
        let table = raw(&[("2016", "20", " Gallup, 2016 poll ")]);
        let frame = shape_percent_series(&table, &LOTTERY).unwrap();
        assert_eq!(frame.cell(0, SOURCE), Some(&Cell::Text(" Gallup, 2016 poll ".into())));
    }

    #[test]
    fn test_empty_table_passes_through() {
        let table = raw(&[]);
        let frame = shape_percent_series(&table, &CRYPTO).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_wrong_metric_column_is_missing_columns() {
        let table = raw(&[("2016", "20", "Gallup")]);
        match shape_percent_series(&table, &CRYPTO) {
            Err(HopeError::MissingColumns { expected, .. }) => {
                assert_eq!(expected, vec!["Under30CryptoPct"]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_concentration_keeps_metric_name() {
        let table = DataTable::new(
            vec!["year".into(), "top_0_01_pct_ownership".into(), "source".into()],
            vec![vec!["2024".into(), "27.5".into(), "Chainalysis".into()]],
        );
        let frame = shape_percent_series(&table, &CONCENTRATION).unwrap();
        assert_eq!(frame.columns(), &[YEAR, "top_0_01_pct_ownership", SOURCE]);
    }
}
