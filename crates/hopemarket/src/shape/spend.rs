//! Shaping of the BLS spend-by-age table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SOURCE, YEAR};
use crate::error::{HopeError, Result};
use crate::frame::{Cell, Frame};
use crate::input::DataTable;

pub const AGE_GROUP: &str = "AgeGroup";
pub const AVG_ANNUAL_SPEND: &str = "AvgAnnualSpend";
pub const AVG_MONTHLY_SPEND: &str = "AvgMonthlySpend";

/// Display order of the age buckets.
pub const AGE_ORDER: [&str; 7] = ["Under 25", "25-34", "35-44", "45-54", "55-64", "65-74", "75+"];

/// Label of the aggregate row that is always excluded.
const ALL_AGES: &str = "all ages";

const RENAMES: &[(&str, &str)] = &[
    ("age_group", AGE_GROUP),
    ("avg_annual_spend_usd", AVG_ANNUAL_SPEND),
    ("year", YEAR),
    ("source", SOURCE),
];

/// What to do with age-group labels outside [`AGE_ORDER`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownAgeGroupPolicy {
    /// Keep them after the known buckets, in input order.
    #[default]
    Append,
    /// Remove them.
    Drop,
}

/// Position of a label in [`AGE_ORDER`].
pub fn age_rank(label: &str) -> Option<usize> {
    let label = label.trim();
    AGE_ORDER.iter().position(|bucket| *bucket == label)
}

fn is_all_ages(cell: &Cell) -> bool {
    cell.as_text()
        .is_some_and(|label| label.trim().eq_ignore_ascii_case(ALL_AGES))
}

/// Shape the raw spend table into `AgeGroup, AvgAnnualSpend, AvgMonthlySpend, ...`.
///
/// An empty table passes through unchanged.
pub fn shape_spend(raw: &DataTable, unknown: UnknownAgeGroupPolicy) -> Result<Frame> {
    let frame = Frame::from_table(raw);
    if frame.is_empty() {
        return Ok(frame);
    }

    let frame = frame.rename(RENAMES);
    let missing = frame.missing_columns(&[AGE_GROUP, AVG_ANNUAL_SPEND]);
    if !missing.is_empty() {
        return Err(HopeError::MissingColumns {
            dataset: "spend by age".to_string(),
            expected: missing,
        });
    }

    let age = frame.column_index(AGE_GROUP).unwrap_or_default();
    let frame = frame
        .filter_rows(|row| !is_all_ages(&row[age]))
        .coerce_numeric(AVG_ANNUAL_SPEND);

    let monthly = frame
        .numbers(AVG_ANNUAL_SPEND)
        .unwrap_or_default()
        .into_iter()
        .map(|annual| annual.map_or(Cell::Missing, |a| Cell::Number(a / 12.0)))
        .collect();
    let frame = frame.with_column(AVG_MONTHLY_SPEND, monthly);

    let rank = |row: &[Cell]| row[age].as_text().and_then(age_rank);
    let frame = match unknown {
        UnknownAgeGroupPolicy::Append => frame,
        UnknownAgeGroupPolicy::Drop => frame.filter_rows(|row| rank(row).is_some()),
    };
    let frame = frame.sort_by_key(|row| rank(row).unwrap_or(AGE_ORDER.len()));

    debug!(rows = frame.row_count(), "shaped spend table");
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[(&str, &str)]) -> DataTable {
        DataTable::new(
            vec![
                "age_group".into(),
                "avg_annual_spend_usd".into(),
                "year".into(),
                "source".into(),
            ],
            rows.iter()
                .map(|(a, s)| vec![a.to_string(), s.to_string(), "2018".into(), "BLS".into()])
                .collect(),
        )
    }

    #[test]
    fn test_age_rank() {
        assert_eq!(age_rank("Under 25"), Some(0));
        assert_eq!(age_rank(" 75+ "), Some(6));
        assert_eq!(age_rank("85+"), None);
    }

    #[test]
    fn test_all_ages_dropped_in_any_case() {
        let table = raw(&[("ALL AGES", "500"), ("All ages", "500"), ("all Ages ", "1"), ("25-34", "483.84")]);
        let frame = shape_spend(&table, UnknownAgeGroupPolicy::Append).unwrap();

        assert_eq!(frame.row_count(), 1);
        assert_eq!(frame.fields(AGE_GROUP).unwrap(), vec!["25-34"]);
    }

    #[test]
    fn test_monthly_derived_and_ordered() {
        let table = raw(&[("65-74", "1589.16"), ("Under 25", "90.6"), ("25-34", "483.84")]);
        let frame = shape_spend(&table, UnknownAgeGroupPolicy::Append).unwrap();

        assert_eq!(frame.columns(), &[AGE_GROUP, AVG_ANNUAL_SPEND, YEAR, SOURCE, AVG_MONTHLY_SPEND]);
        assert_eq!(frame.fields(AGE_GROUP).unwrap(), vec!["Under 25", "25-34", "65-74"]);
        let monthly: Vec<f64> = frame
            .numbers(AVG_MONTHLY_SPEND)
            .unwrap()
            .into_iter()
            .map(|m| m.unwrap())
            .collect();
        assert!((monthly[0] - 7.55).abs() < 1e-9);
        assert!((monthly[1] - 40.32).abs() < 1e-9);
        assert!((monthly[2] - 132.43).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_spend_becomes_missing() {
        let table = raw(&[("35-44", "about forty")]);
        let frame = shape_spend(&table, UnknownAgeGroupPolicy::Append).unwrap();

        assert_eq!(frame.cell(0, AVG_ANNUAL_SPEND), Some(&Cell::Missing));
        assert_eq!(frame.cell(0, AVG_MONTHLY_SPEND), Some(&Cell::Missing));
    }

    #[test]
    fn test_unknown_labels_appended_in_input_order() {
        let table = raw(&[("Teens", "1"), ("45-54", "2"), ("Retired", "3"), ("Under 25", "4")]);
        let frame = shape_spend(&table, UnknownAgeGroupPolicy::Append).unwrap();
        assert_eq!(
            frame.fields(AGE_GROUP).unwrap(),
            vec!["Under 25", "45-54", "Teens", "Retired"]
        );
    }

    #[test]
    fn test_unknown_labels_dropped() {
        let table = raw(&[("Teens", "1"), ("45-54", "2")]);
        let frame = shape_spend(&table, UnknownAgeGroupPolicy::Drop).unwrap();
        assert_eq!(frame.fields(AGE_GROUP).unwrap(), vec!["45-54"]);
    }

    #[test]
    fn test_empty_table_passes_through() {
        let table = DataTable::new(vec!["age_group".into()], Vec::new());
        let frame = shape_spend(&table, UnknownAgeGroupPolicy::Append).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.columns(), &["age_group"]);
    }

    #[test]
    fn test_missing_columns_reported() {
        let table = DataTable::new(
            vec!["bucket".into(), "avg_annual_spend_usd".into()],
            vec![vec!["25-34".into(), "1".into()]],
        );
        match shape_spend(&table, UnknownAgeGroupPolicy::Append) {
            Err(HopeError::MissingColumns { expected, .. }) => assert_eq!(expected, vec![AGE_GROUP]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }
}
