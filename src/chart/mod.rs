//! Chart Binding
//!
//! Builds chart specifications from filtered views and renders them to the
//! Plotly figure format used by the dashboard page.

mod plotly;
pub mod spec;

pub use spec::{
    bind, bind_line_chart, bind_scatter_chart, ChartKind, ChartPoint, ChartSpec,
    LINE_CHART_TITLE, SCATTER_CHART_TITLE,
};
