//! CLI command implementations.

pub mod export;
pub mod render;
pub mod serve;
pub mod status;

use std::path::PathBuf;

use hopemarket::{DashboardConfig, Pipeline};

/// Build a pipeline from the optional config file and data directory override.
pub fn pipeline(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => DashboardConfig::load(&path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }

    if !config.data_dir.is_dir() {
        tracing::warn!(
            data_dir = %config.data_dir.display(),
            "data directory not found; every section will show a warning"
        );
    }

    Ok(Pipeline::new(config))
}
