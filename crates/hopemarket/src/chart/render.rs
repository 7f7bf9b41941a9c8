//! Mapping from shaped frames to Plotly figures.
//!
//! Renderers are pure. An empty frame yields `None`; the caller shows a
//! warning in place of the chart.

use super::figure::{
    Annotation, Axis, AxisTitle, BarTrace, ChartSpec, Font, Layout, Legend, Line, Margin, Marker,
    PieMarker, PieTrace, ScatterTrace, Trace,
};
use super::style::{
    AXIS_LINE, CYAN, ChartStyle, GRID, INK, PINK, PINK_SOFT, PURPLE, SLATE, TRANSPARENT, ZERO_LINE,
};
use crate::frame::Frame;
use crate::shape::{AGE_GROUP, AGE_ORDER, AVG_MONTHLY_SPEND, ConcentrationSplit, YEAR};

/// Look of one percentage time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChart {
    pub trace_name: &'static str,
    pub color: &'static str,
    /// Text after the whole-percent value in the hover label.
    pub hover_label: &'static str,
    pub height: u32,
}

pub const LOTTERY_LINE: LineChart = LineChart {
    trace_name: "Under-30 lottery participation",
    color: PINK_SOFT,
    hover_label: "under 30 played",
    height: 380,
};

pub const CRYPTO_LINE: LineChart = LineChart {
    trace_name: "Under-30 crypto ownership",
    color: CYAN,
    hover_label: "own crypto",
    height: 420,
};

fn dark_layout(height: Option<u32>, margin: Margin) -> Layout {
    Layout {
        height,
        margin,
        paper_bgcolor: TRANSPARENT.to_string(),
        plot_bgcolor: TRANSPARENT.to_string(),
        font: Font {
            size: None,
            color: Some(INK.to_string()),
        },
        showlegend: false,
        legend: None,
        xaxis: None,
        yaxis: None,
        annotations: Vec::new(),
    }
}

fn category_axis() -> Axis {
    Axis {
        showgrid: Some(false),
        showline: Some(true),
        linecolor: Some(AXIS_LINE.to_string()),
        ..Axis::default()
    }
}

fn value_axis(title: &str) -> Axis {
    Axis {
        title: Some(AxisTitle {
            text: title.to_string(),
        }),
        gridcolor: Some(GRID.to_string()),
        zerolinecolor: Some(ZERO_LINE.to_string()),
        ..Axis::default()
    }
}

fn marker_outline(style: &ChartStyle) -> Option<Line> {
    style.glow.then(|| Line::new(PURPLE, 1.2))
}

/// Bar chart of average monthly spend by age group.
pub fn spend_bar(frame: &Frame, style: &ChartStyle) -> Option<ChartSpec> {
    if frame.is_empty() {
        return None;
    }
    let labels = frame.fields(AGE_GROUP)?;
    let monthly = frame.numbers(AVG_MONTHLY_SPEND)?;

    // Known buckets first, then any other labels in the order they appear
    let mut categories: Vec<String> = AGE_ORDER.iter().map(|s| s.to_string()).collect();
    for label in &labels {
        if !categories.contains(label) {
            categories.push(label.clone());
        }
    }

    let trace = BarTrace {
        x: labels,
        y: monthly,
        name: "Avg monthly spend".to_string(),
        marker: Marker {
            color: Some(PINK.to_string()),
            size: None,
            line: marker_outline(style),
        },
        hovertemplate: "<b>%{x}</b><br>$%{y:.2f} / month<extra></extra>".to_string(),
    };

    let mut layout = dark_layout(Some(460), Margin::uniform(10));
    layout.showlegend = true;
    layout.legend = Some(Legend {
        orientation: "h".to_string(),
        yanchor: "bottom".to_string(),
        y: 1.02,
        xanchor: "right".to_string(),
        x: 1.0,
    });
    layout.xaxis = Some(Axis {
        categoryorder: Some("array".to_string()),
        categoryarray: Some(categories),
        ..category_axis()
    });
    layout.yaxis = Some(value_axis("Avg monthly lottery spending (USD)"));

    Some(ChartSpec {
        data: vec![Trace::Bar(trace)],
        layout,
    })
}

/// Line (or marker) chart of a year-indexed percentage.
pub fn percent_line(
    frame: &Frame,
    metric: &str,
    look: &LineChart,
    style: &ChartStyle,
) -> Option<ChartSpec> {
    let years = frame.numbers(YEAR)?;
    let values = frame.numbers(metric)?;
    let (x, y): (Vec<f64>, Vec<f64>) = years
        .into_iter()
        .zip(values)
        .filter_map(|(year, value)| Some((year?, value?)))
        .unzip();
    if x.is_empty() {
        return None;
    }

    let trace = ScatterTrace {
        x,
        y,
        mode: style.line_mode.as_str().to_string(),
        name: look.trace_name.to_string(),
        line: Line::new(look.color, 3.0),
        marker: Marker {
            color: Some(look.color.to_string()),
            size: Some(8),
            line: marker_outline(style),
        },
        hovertemplate: format!("<b>%{{x}}</b><br>%{{y:.0f}}% {}<extra></extra>", look.hover_label),
    };

    let mut layout = dark_layout(Some(look.height), Margin::uniform(10));
    layout.xaxis = Some(Axis {
        tickformat: Some("d".to_string()),
        ..category_axis()
    });
    layout.yaxis = Some(Axis {
        rangemode: Some("tozero".to_string()),
        ..value_axis("% under 30")
    });

    Some(ChartSpec {
        data: vec![Trace::Scatter(trace)],
        layout,
    })
}

/// Donut of the top holders' share against everyone else.
pub fn concentration_donut(split: &ConcentrationSplit, style: &ChartStyle) -> ChartSpec {
    let (labels, values): (Vec<String>, Vec<f64>) = split
        .slices()
        .iter()
        .map(|(label, value)| (label.to_string(), *value))
        .unzip();

    let trace = PieTrace {
        labels,
        values,
        hole: 0.55,
        sort: false,
        marker: PieMarker {
            colors: vec![CYAN.to_string(), SLATE.to_string()],
            line: Line::new(AXIS_LINE, if style.glow { 1.0 } else { 0.0 }),
        },
        textinfo: "percent".to_string(),
        textfont: Font {
            size: Some(16),
            color: None,
        },
        hovertemplate: "%{label}: %{percent:.1%}<extra></extra>".to_string(),
    };

    let mut layout = dark_layout(None, Margin::uniform(20));
    layout.annotations = vec![Annotation {
        text: format!("<b>{:.1}%</b><br>of all<br>Bitcoin", split.top_pct),
        showarrow: false,
        font: Font {
            size: Some(16),
            color: Some(PINK_SOFT.to_string()),
        },
    }];

    ChartSpec {
        data: vec![Trace::Pie(trace)],
        layout,
    }
}
