//! Render-ready view models

use serde::Serialize;
use serde_json::Value;

use crate::chart::{ChartKind, ChartSpec};
use crate::dataset::{DataSample, RangeSelection, YearBounds};

/// One chart section: its slider value and the chart built from it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPanel {
    pub kind: ChartKind,
    pub selection: RangeSelection,
    pub spec: ChartSpec,
}

impl ChartPanel {
    pub fn figure(&self) -> Value {
        self.spec.to_plotly()
    }
}

/// The whole page for one render
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub bounds: Option<YearBounds>,
    pub rows: usize,
    pub sample: DataSample,
    pub line: ChartPanel,
    pub scatter: ChartPanel,
}
