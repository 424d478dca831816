//! Plotly figure output
//!
//! The browser draws charts with Plotly.js; this turns a [`ChartSpec`] into
//! the `{data, layout}` figure object that `Plotly.react` accepts.

use serde_json::{json, Value};

use super::spec::{ChartKind, ChartSpec};

const TRACE_COLOR: &str = "#636EFA";

impl ChartSpec {
    /// Plotly figure JSON for this chart
    ///
    /// Missing values are emitted as `null`, which Plotly draws as a gap.
    pub fn to_plotly(&self) -> Value {
        let mode = match self.kind {
            ChartKind::Line => "lines",
            ChartKind::Scatter => "markers",
        };

        json!({
            "data": [{
                "type": "scatter",
                "mode": mode,
                "name": self.y_field,
                "x": self.xs(),
                "y": self.ys(),
                "line": { "color": TRACE_COLOR },
                "marker": { "color": TRACE_COLOR },
                "hovertemplate": format!("{}=%{{x}}<br>{}=%{{y}}<extra></extra>", self.x_field, self.y_field),
            }],
            "layout": {
                "title": { "text": self.title },
                "xaxis": { "title": { "text": self.x_field } },
                "yaxis": { "title": { "text": self.y_field } },
                "margin": { "t": 60, "r": 20, "b": 50, "l": 70 },
            },
        })
    }
}
