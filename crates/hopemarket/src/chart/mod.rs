//! Chart rendering: shaped frames to Plotly figure descriptions.

mod render;
mod figure;
mod style;

pub use render::{CRYPTO_LINE, LOTTERY_LINE, LineChart, concentration_donut, percent_line, spend_bar};
pub use figure::{
    Annotation, Axis, AxisTitle, BarTrace, ChartSpec, Font, Layout, Legend, Line, Margin, Marker,
    PieMarker, PieTrace, ScatterTrace, Trace,
};
pub use style::{CYAN, ChartStyle, LineMode, PINK, PINK_SOFT, PURPLE};
