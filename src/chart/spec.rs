//! Chart specifications
//!
//! A `ChartSpec` is a renderer-agnostic description of one chart: which
//! fields go on which axis, what kind of mark to draw, the title and the
//! data points. The binders below are the only way the dashboard builds one.

use serde::{Deserialize, Serialize};

use crate::dataset::{FilteredView, PERIOD_COLUMN, VALUE_COLUMN};

pub const LINE_CHART_TITLE: &str = "External Debt Trend (Filtered by Year Range)";
pub const SCATTER_CHART_TITLE: &str = "External Debt Distribution (Filtered by Year Range)";

/// Which of the two dashboard charts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Trend over the years, points joined in source order
    Line,
    /// Individual observations as unconnected markers
    Scatter,
}

impl ChartKind {
    /// Fixed title for this kind of chart
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Line => LINE_CHART_TITLE,
            ChartKind::Scatter => SCATTER_CHART_TITLE,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

impl std::str::FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "scatter" => Ok(ChartKind::Scatter),
            _ => Err(format!("Invalid chart kind: {}. Use line or scatter", s)),
        }
    }
}

/// One plotted point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub x: i32,
    pub y: Option<f64>,
}

/// Declarative chart description consumed by the renderer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<i32> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// Build the chart of the given kind over a filtered view
///
/// Never fails: an empty view yields a spec with no points.
pub fn bind(kind: ChartKind, view: &FilteredView) -> ChartSpec {
    let points = view
        .records()
        .iter()
        .map(|r| ChartPoint {
            x: r.ref_period,
            y: r.value,
        })
        .collect();

    ChartSpec {
        kind,
        title: kind.title().to_string(),
        x_field: PERIOD_COLUMN.to_string(),
        y_field: VALUE_COLUMN.to_string(),
        points,
    }
}

pub fn bind_line_chart(view: &FilteredView) -> ChartSpec {
    bind(ChartKind::Line, view)
}

pub fn bind_scatter_chart(view: &FilteredView) -> ChartSpec {
    bind(ChartKind::Scatter, view)
}
