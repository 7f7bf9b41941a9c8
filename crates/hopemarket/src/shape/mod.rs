//! Per-dataset shaping: rename, coerce, filter and order raw tables into
//! chart-ready frames.

mod concentration;
mod percent;
mod spend;

pub use concentration::{
    ConcentrationSelector, ConcentrationSplit, OTHER_HOLDERS_LABEL, TOP_HOLDERS_LABEL, YearRange,
};
pub use percent::{CONCENTRATION, CRYPTO, LOTTERY, PercentSeries, shape_percent_series};
pub use spend::{
    AGE_GROUP, AGE_ORDER, AVG_ANNUAL_SPEND, AVG_MONTHLY_SPEND, UnknownAgeGroupPolicy, age_rank,
    shape_spend,
};

/// Canonical year column shared by every dataset.
pub const YEAR: &str = "Year";
/// Canonical attribution column shared by every dataset.
pub const SOURCE: &str = "Source";
