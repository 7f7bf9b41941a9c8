//! The four datasets the dashboard knows about.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::ExportColumns;
use crate::frame::Frame;
use crate::input::DataTable;
use crate::shape::{
    AGE_GROUP, AVG_ANNUAL_SPEND, AVG_MONTHLY_SPEND, CONCENTRATION, CRYPTO, LOTTERY, SOURCE,
    UnknownAgeGroupPolicy, YEAR, shape_percent_series, shape_spend,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// BLS average lottery spend by age group.
    Spend,
    /// Gallup under-30 lottery participation.
    Lottery,
    /// Under-30 crypto ownership.
    Crypto,
    /// Bitcoin ownership concentration.
    Concentration,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Spend,
        Dataset::Lottery,
        Dataset::Crypto,
        Dataset::Concentration,
    ];

    /// Short identifier used in URLs and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Dataset::Spend => "spend",
            Dataset::Lottery => "lottery",
            Dataset::Crypto => "crypto",
            Dataset::Concentration => "concentration",
        }
    }

    /// File name inside the data directory.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Dataset::Spend => "lottery_age_spend_bls_2018.csv",
            Dataset::Lottery => "lottery_under30.csv",
            Dataset::Crypto => "crypto_under30.csv",
            Dataset::Concentration => "crypto_concentration.csv",
        }
    }

    /// Columns the raw file is expected to carry.
    pub fn expected_columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Spend => &["age_group", "avg_annual_spend_usd", "year", "source"],
            Dataset::Lottery => &["year", "under30_lottery_pct", "source"],
            Dataset::Crypto => &["year", "under30_crypto_pct", "source"],
            Dataset::Concentration => &["year", "top_0_01_pct_ownership", "source"],
        }
    }

    /// Warning shown in place of a chart when the file is missing or malformed.
    pub fn missing_warning(&self, file_name: &str) -> String {
        let expected = self
            .expected_columns()
            .iter()
            .map(|c| format!("`{}`", c))
            .collect::<Vec<_>>()
            .join(", ");
        format!("`{}` missing or malformed. Expected columns: {}.", file_name, expected)
    }

    /// Canonical columns written by the cleaned export.
    pub fn export_columns(&self) -> ExportColumns {
        match self {
            Dataset::Spend => ExportColumns::new()
                .column(AGE_GROUP)
                .column(AVG_ANNUAL_SPEND)
                .column(AVG_MONTHLY_SPEND)
                .column(YEAR)
                .column(SOURCE),
            Dataset::Lottery => ExportColumns::new()
                .column(YEAR)
                .column(LOTTERY.metric)
                .column(SOURCE),
            Dataset::Crypto => ExportColumns::new()
                .column(YEAR)
                .column(CRYPTO.metric)
                .column(SOURCE),
            Dataset::Concentration => ExportColumns::new()
                .column(YEAR)
                .column(CONCENTRATION.metric)
                .column(SOURCE),
        }
    }

    /// Download name of the cleaned export.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            Dataset::Spend => "bls_lottery_spend_cleaned.csv",
            Dataset::Lottery => "lottery_under30_cleaned.csv",
            Dataset::Crypto => "crypto_under30_cleaned.csv",
            Dataset::Concentration => "crypto_concentration_cleaned.csv",
        }
    }

    /// Run this dataset's shaper over a raw table.
    pub fn shape(&self, raw: &DataTable, unknown_ages: UnknownAgeGroupPolicy) -> Result<Frame> {
        match self {
            Dataset::Spend => shape_spend(raw, unknown_ages),
            Dataset::Lottery => shape_percent_series(raw, &LOTTERY),
            Dataset::Crypto => shape_percent_series(raw, &CRYPTO),
            Dataset::Concentration => shape_percent_series(raw, &CONCENTRATION),
        }
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spend" | "bls" => Ok(Dataset::Spend),
            "lottery" | "gallup" => Ok(Dataset::Lottery),
            "crypto" => Ok(Dataset::Crypto),
            "concentration" => Ok(Dataset::Concentration),
            _ => Err(format!(
                "Unknown dataset: {}. Use spend, lottery, crypto, or concentration.",
                s
            )),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
