//! Dashboard configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;
use crate::dataset::Dataset;
use crate::error::{HopeError, Result};
use crate::input::CachePolicy;
use crate::shape::UnknownAgeGroupPolicy;

/// File name for each dataset, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFiles {
    pub spend: String,
    pub lottery: String,
    pub crypto: String,
    pub concentration: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            spend: Dataset::Spend.default_file_name().to_string(),
            lottery: Dataset::Lottery.default_file_name().to_string(),
            crypto: Dataset::Crypto.default_file_name().to_string(),
            concentration: Dataset::Concentration.default_file_name().to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn get(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Spend => &self.spend,
            Dataset::Lottery => &self.lottery,
            Dataset::Crypto => &self.crypto,
            Dataset::Concentration => &self.concentration,
        }
    }
}

/// Configuration for building dashboards.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "data_dir": "/srv/hopemarket/data", "cache": { "kind": "content_hash" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the source files.
    pub data_dir: PathBuf,
    pub files: DatasetFiles,
    /// Invalidation policy for the load cache.
    pub cache: CachePolicy,
    /// Treatment of age-group labels outside the fixed buckets.
    pub unknown_age_groups: UnknownAgeGroupPolicy,
    /// Style used when a request does not choose one.
    pub style: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            files: DatasetFiles::default(),
            cache: CachePolicy::default(),
            unknown_age_groups: UnknownAgeGroupPolicy::default(),
            style: ChartStyle::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            HopeError::Config(format!("Failed to open '{}': {}", path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            HopeError::Config(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Replace the data directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn file_name(&self, dataset: Dataset) -> &str {
        self.files.get(dataset)
    }

    /// Full path of a dataset's source file.
    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.data_dir.join(self.file_name(dataset))
    }
}
