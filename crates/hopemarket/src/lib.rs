//! Hopemarket: a data-storytelling dashboard comparing the lottery era with the crypto era.
//!
//! Four small CSV datasets are loaded, normalized, reshaped and rendered as
//! Plotly figures for young adults' lottery spending and participation, crypto
//! ownership, and Bitcoin ownership concentration.
//!
//! # Core Principles
//!
//! - **Never fail the page**: A missing or malformed file becomes a warning in its own section
//! - **Fixed ordering**: Age groups follow the survey buckets, series follow the calendar
//! - **Reproducible exports**: The same shaped frame always produces the same CSV bytes
//!
//! # Example
//!
//! ```no_run
//! use hopemarket::{DashboardConfig, PageParams, Pipeline};
//!
//! let pipeline = Pipeline::new(DashboardConfig::default().with_data_dir("data"));
//! let mut cache = pipeline.new_cache();
//! let dashboard = pipeline.dashboard(&mut cache, &PageParams::default());
//!
//! for section in &dashboard.sections {
//!     println!("{}", section.title);
//! }
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod frame;
pub mod input;
pub mod shape;

pub use chart::{ChartSpec, ChartStyle, LineMode};
pub use config::{DashboardConfig, DatasetFiles};
pub use dashboard::{
    Dashboard, Download, FileStatus, PageParams, Pipeline, Section, SectionBody, YearControl,
};
pub use dataset::Dataset;
pub use error::{HopeError, Result};
pub use export::{ExportColumns, to_csv_bytes};
pub use frame::{Cell, Frame};
pub use input::{CachePolicy, DataTable, LoadOutcome, Loader, SourceMetadata, TableCache};
pub use shape::{ConcentrationSelector, ConcentrationSplit, UnknownAgeGroupPolicy, YearRange};
