//! Palette and user-selectable style parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const PINK: &str = "#ff69c9";
pub const PINK_SOFT: &str = "#ff8fd7";
pub const PURPLE: &str = "#b084f5";
pub const CYAN: &str = "#72f7ff";
pub const SLATE: &str = "#3a3a3f";
pub const INK: &str = "#eaeaf2";

pub const TRANSPARENT: &str = "rgba(0,0,0,0)";
pub const AXIS_LINE: &str = "rgba(255,255,255,0.15)";
pub const GRID: &str = "rgba(255,255,255,0.06)";
pub const ZERO_LINE: &str = "rgba(255,255,255,0.12)";

/// How the time series draw their points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineMode {
    #[default]
    #[serde(rename = "lines+markers")]
    LinesMarkers,
    #[serde(rename = "markers")]
    Markers,
}

impl LineMode {
    /// Plotly `mode` string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineMode::LinesMarkers => "lines+markers",
            LineMode::Markers => "markers",
        }
    }

    /// Label shown next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            LineMode::LinesMarkers => "Lines + markers",
            LineMode::Markers => "Markers only",
        }
    }
}

impl FromStr for LineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "").as_str() {
            "lines+markers" | "lines" | "linesmarkers" => Ok(LineMode::LinesMarkers),
            "markers" | "markersonly" => Ok(LineMode::Markers),
            _ => Err(format!("Unknown line style: {}. Use lines+markers or markers.", s)),
        }
    }
}

impl fmt::Display for LineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation parameters passed to every renderer. They never touch the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Neon outlines on markers and glowing panels.
    pub glow: bool,
    pub line_mode: LineMode,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            glow: true,
            line_mode: LineMode::LinesMarkers,
        }
    }
}
