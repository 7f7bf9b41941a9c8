//! Year selection over the ownership-concentration table.

use serde::Serialize;

use super::percent::CONCENTRATION;
use super::{SOURCE, YEAR};
use crate::error::{HopeError, Result};
use crate::frame::Frame;

pub const TOP_HOLDERS_LABEL: &str = "Top 0.01% of holders";
pub const OTHER_HOLDERS_LABEL: &str = "All other holders";

/// Inclusive bounds of the years present in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i64,
    pub max: i64,
}

impl YearRange {
    /// Bound a requested year to the range.
    pub fn clamp(&self, year: i64) -> i64 {
        year.clamp(self.min, self.max)
    }
}

/// A year's holdings split into the top share and its complement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationSplit {
    pub year: i64,
    pub top_pct: f64,
    pub other_pct: f64,
    pub source: String,
}

impl ConcentrationSplit {
    /// Labelled slices in display order.
    pub fn slices(&self) -> [(&'static str, f64); 2] {
        [
            (TOP_HOLDERS_LABEL, self.top_pct),
            (OTHER_HOLDERS_LABEL, self.other_pct),
        ]
    }
}

/// Picks one year out of a shaped concentration frame.
pub struct ConcentrationSelector;

impl ConcentrationSelector {
    /// Min and max integer year present, or `None` for a frame without years.
    pub fn year_range(frame: &Frame) -> Option<YearRange> {
        let years: Vec<i64> = frame
            .numbers(YEAR)?
            .into_iter()
            .flatten()
            .map(|y| y.trunc() as i64)
            .collect();
        let min = *years.iter().min()?;
        let max = *years.iter().max()?;
        Some(YearRange { min, max })
    }

    /// Split for `year`. The first matching row wins when a year repeats.
    pub fn select(frame: &Frame, year: i64) -> Result<ConcentrationSplit> {
        let years = frame.numbers(YEAR).unwrap_or_default();
        let row = years
            .iter()
            .position(|y| *y == Some(year as f64))
            .ok_or(HopeError::NoMatchingRow { year })?;

        let top_pct = frame
            .cell(row, CONCENTRATION.metric)
            .and_then(|c| c.as_number())
            .ok_or(HopeError::NoMatchingRow { year })?;
        let source = frame
            .cell(row, SOURCE)
            .map(|c| c.to_field())
            .unwrap_or_default();

        Ok(ConcentrationSplit {
            year,
            top_pct,
            other_pct: 100.0 - top_pct,
            source,
        })
    }
}
