//! Page assembly: runs every dataset through load, shape and render.
//!
//! Each section is built independently. A missing file, a malformed table
//! or an absent concentration year turns into that section's warning or
//! error; the other sections are unaffected.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::{
    CRYPTO_LINE, ChartSpec, ChartStyle, LOTTERY_LINE, concentration_donut, percent_line, spend_bar,
};
use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::error::{HopeError, Result};
use crate::export::to_csv_bytes;
use crate::frame::Frame;
use crate::input::{LoadOutcome, Loader, TableCache};
use crate::shape::{ConcentrationSelector, CRYPTO, LOTTERY, YearRange};

/// Per-request presentation choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageParams {
    /// Requested concentration year; clamped to the years in the data.
    pub year: Option<i64>,
    pub style: ChartStyle,
}

/// Whether a source file produced rows.
#[derive(Debug, Clone, Serialize)]
pub struct FileStatus {
    pub dataset: Dataset,
    pub file: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        if self.ok { "OK" } else { "Missing/Empty" }
    }
}

/// A downloadable cleaned export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Download {
    pub dataset: Dataset,
    pub file_name: String,
    pub label: String,
}

/// What a section displays.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Chart {
        figure: ChartSpec,
        caption: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        download: Option<Download>,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
    },
}

impl SectionBody {
    pub fn chart(&self) -> Option<&ChartSpec> {
        match self {
            SectionBody::Chart { figure, .. } => Some(figure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub dataset: Dataset,
    pub title: String,
    pub body: SectionBody,
}

/// State of the concentration year slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearControl {
    pub range: YearRange,
    pub selected: i64,
}

/// Everything a page render needs, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub files: Vec<FileStatus>,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_control: Option<YearControl>,
    pub style: ChartStyle,
}

impl Dashboard {
    pub fn section(&self, dataset: Dataset) -> Option<&Section> {
        self.sections.iter().find(|s| s.dataset == dataset)
    }
}

/// Load, shape, render and export, driven by a [`DashboardConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: DashboardConfig,
    loader: Loader,
}

impl Pipeline {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            loader: Loader::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// A cache using the configured invalidation policy.
    pub fn new_cache(&self) -> TableCache {
        TableCache::new(self.config.cache)
    }

    /// Load a dataset's source file through `cache`.
    pub fn load(&self, cache: &mut TableCache, dataset: Dataset) -> LoadOutcome {
        self.loader.load(cache, self.config.path_for(dataset))
    }

    /// Load and shape a dataset.
    pub fn shape(&self, cache: &mut TableCache, dataset: Dataset) -> Result<Frame> {
        let outcome = self.load(cache, dataset);
        dataset.shape(&outcome.table, self.config.unknown_age_groups)
    }

    /// Cleaned CSV bytes for a dataset's download.
    pub fn export(&self, cache: &mut TableCache, dataset: Dataset) -> Result<Vec<u8>> {
        let frame = self.shape(cache, dataset)?;
        if frame.is_empty() {
            return Err(HopeError::EmptyData(format!(
                "{} has no rows to export",
                self.config.file_name(dataset)
            )));
        }
        to_csv_bytes(&frame, &dataset.export_columns())
    }

    /// Per-file detection status, as shown in the sidebar.
    pub fn file_status(&self, cache: &mut TableCache) -> Vec<FileStatus> {
        Dataset::ALL
            .iter()
            .map(|&dataset| {
                let outcome = self.load(cache, dataset);
                FileStatus {
                    dataset,
                    file: self.config.file_name(dataset).to_string(),
                    ok: outcome.is_ok(),
                    diagnostic: outcome.diagnostic,
                }
            })
            .collect()
    }

    /// Build the full page for one request.
    pub fn dashboard(&self, cache: &mut TableCache, params: &PageParams) -> Dashboard {
        let files = self.file_status(cache);
        let style = params.style;

        let mut sections = vec![
            self.spend_section(cache, &style),
            self.percent_section(cache, Dataset::Lottery, &style),
            self.percent_section(cache, Dataset::Crypto, &style),
        ];
        let (concentration, year_control) = self.concentration_section(cache, params);
        sections.push(concentration);

        let charts = sections.iter().filter(|s| s.body.chart().is_some()).count();
        info!(charts, sections = sections.len(), "built dashboard");

        Dashboard {
            files,
            sections,
            year_control,
            style,
        }
    }

    fn warning(&self, dataset: Dataset) -> SectionBody {
        SectionBody::Warning {
            message: dataset.missing_warning(self.config.file_name(dataset)),
        }
    }

    /// Shape a dataset, turning empty or malformed input into the section warning.
    fn shaped_or_warning(
        &self,
        cache: &mut TableCache,
        dataset: Dataset,
    ) -> std::result::Result<Frame, SectionBody> {
        match self.shape(cache, dataset) {
            Ok(frame) if !frame.is_empty() => Ok(frame),
            Ok(_) => {
                debug!(%dataset, "no rows to chart");
                Err(self.warning(dataset))
            }
            Err(e) => {
                warn!(%dataset, error = %e, "could not shape dataset");
                Err(self.warning(dataset))
            }
        }
    }

    /// Offer a download when the shaped frame carries every exported column.
    fn download(&self, dataset: Dataset, frame: &Frame, label: &str) -> Option<Download> {
        let columns = dataset.export_columns();
        let required: Vec<&str> = columns.mapping().keys().map(String::as_str).collect();
        let missing = frame.missing_columns(&required);
        if !missing.is_empty() {
            warn!(%dataset, ?missing, "cleaned export unavailable");
            return None;
        }
        Some(Download {
            dataset,
            file_name: dataset.export_file_name().to_string(),
            label: label.to_string(),
        })
    }

    fn spend_section(&self, cache: &mut TableCache, style: &ChartStyle) -> Section {
        let dataset = Dataset::Spend;
        let body = match self.shaped_or_warning(cache, dataset) {
            Err(body) => body,
            Ok(frame) => match spend_bar(&frame, style) {
                Some(figure) => SectionBody::Chart {
                    figure,
                    caption: "Source: Bureau of Labor Statistics, CES 2017-2018 (BLS TED 2019). \
                              Monthly values are annual spend divided by 12."
                        .to_string(),
                    download: self.download(dataset, &frame, "Download BLS (cleaned CSV)"),
                },
                None => self.warning(dataset),
            },
        };

        Section {
            dataset,
            title: "Lottery Era: Average Monthly Lottery Spend by Age (2017-2018)".to_string(),
            body,
        }
    }

    fn percent_section(
        &self,
        cache: &mut TableCache,
        dataset: Dataset,
        style: &ChartStyle,
    ) -> Section {
        let (series, look, title, caption, label) = match dataset {
            Dataset::Crypto => (
                CRYPTO,
                CRYPTO_LINE,
                "Crypto Era: Under-30 Ownership (2015-2024)",
                "Sources: Pew, Finder, CNBC/Credit Karma, Gemini. \
                 % of under-30s who own crypto (survey methodologies vary).",
                "Download Crypto (cleaned CSV)",
            ),
            _ => (
                LOTTERY,
                LOTTERY_LINE,
                "Gallup: Under-30 Lottery Participation (2003, 2007, 2016)",
                "Source: Gallup (2003, 2007, 2016). \
                 % of under-30s who reported playing the lottery.",
                "Download Gallup (cleaned CSV)",
            ),
        };

        let body = match self.shaped_or_warning(cache, dataset) {
            Err(body) => body,
            Ok(frame) => match percent_line(&frame, series.metric, &look, style) {
                Some(figure) => SectionBody::Chart {
                    figure,
                    caption: caption.to_string(),
                    download: self.download(dataset, &frame, label),
                },
                None => self.warning(dataset),
            },
        };

        Section {
            dataset,
            title: title.to_string(),
            body,
        }
    }

    fn concentration_section(
        &self,
        cache: &mut TableCache,
        params: &PageParams,
    ) -> (Section, Option<YearControl>) {
        let dataset = Dataset::Concentration;
        let section = |body| Section {
            dataset,
            title: "The New House: Who Holds the Power?".to_string(),
            body,
        };

        let frame = match self.shaped_or_warning(cache, dataset) {
            Ok(frame) => frame,
            Err(body) => return (section(body), None),
        };
        let Some(range) = ConcentrationSelector::year_range(&frame) else {
            return (section(self.warning(dataset)), None);
        };

        let year = params.year.map_or(range.max, |y| range.clamp(y));
        let control = YearControl {
            range,
            selected: year,
        };

        let body = match ConcentrationSelector::select(&frame, year) {
            Ok(split) => SectionBody::Chart {
                caption: format!(
                    "Source: {} ({}). The top 0.01% of holders control {:.1}% of Bitcoin's total supply.",
                    split.source, split.year, split.top_pct
                ),
                figure: concentration_donut(&split, &params.style),
                download: self.download(dataset, &frame, "Download Concentration (cleaned CSV)"),
            },
            Err(e) => {
                warn!(year, error = %e, "no concentration row for selected year");
                SectionBody::Error {
                    message: format!(
                        "{}. Your CSV must have one row per year with columns: {}.",
                        e,
                        dataset.expected_columns().join(", ")
                    ),
                }
            }
        };

        (section(body), Some(control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Cell;

    #[test]
    fn test_all_sections_warn_without_data() {
        let config = DashboardConfig::default().with_data_dir("/nonexistent/hopemarket");
        let pipeline = Pipeline::new(config);
        let mut cache = pipeline.new_cache();

        let dashboard = pipeline.dashboard(&mut cache, &PageParams::default());

        assert_eq!(dashboard.sections.len(), 4);
        assert!(dashboard.files.iter().all(|f| !f.ok && f.diagnostic.is_some()));
        assert!(
            dashboard
                .sections
                .iter()
                .all(|s| matches!(s.body, SectionBody::Warning { .. }))
        );
        assert!(dashboard.year_control.is_none());
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_export_of_missing_dataset_is_error() {
        let pipeline = Pipeline::new(DashboardConfig::default().with_data_dir("/nonexistent"));
        let mut cache = pipeline.new_cache();
        assert!(matches!(
            pipeline.export(&mut cache, Dataset::Crypto),
            Err(HopeError::EmptyData(_))
        ));
    }

    #[test]
    fn test_download_requires_export_columns() {
        let pipeline = Pipeline::new(DashboardConfig::default());
        let complete = Frame::new(
            vec!["Year".into(), "Under30CryptoPct".into(), "Source".into()],
            vec![vec![Cell::Number(2020.0), Cell::Number(12.0), Cell::Text("Pew".into())]],
        );
        let download = pipeline
            .download(Dataset::Crypto, &complete, "Download")
            .unwrap();
        assert_eq!(download.file_name, Dataset::Crypto.export_file_name());

        let partial = Frame::new(
            vec!["Year".into()],
            vec![vec![Cell::Number(2020.0)]],
        );
        assert!(pipeline.download(Dataset::Crypto, &partial, "Download").is_none());
    }

    #[test]
    fn test_file_status_label() {
        let status = FileStatus {
            dataset: Dataset::Spend,
            file: "x.csv".into(),
            ok: true,
            diagnostic: None,
        };
        assert_eq!(status.label(), "OK");
    }
}
