//! Data Transfer Objects
//!
//! Request and response types for the HTTP endpoints.
//! These types are serialized/deserialized to/from JSON and query strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::ChartSpec;
use crate::dataset::{DataSample, RangeSelection, Record, YearBounds};

// ============================================
// WIDGET PARAMS
// ============================================

/// Year range query parameters (`?from=2008&to=2010`)
///
/// Missing ends default to the observed extremes.
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    #[serde(default)]
    pub from: Option<i32>,
    #[serde(default)]
    pub to: Option<i32>,
}

/// Slider values submitted with the dashboard form
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub line_from: Option<i32>,
    #[serde(default)]
    pub line_to: Option<i32>,
    #[serde(default)]
    pub scatter_from: Option<i32>,
    #[serde(default)]
    pub scatter_to: Option<i32>,
}

// ============================================
// DATASET DTOs
// ============================================

/// Dataset overview
#[derive(Debug, Serialize)]
pub struct DatasetSummaryResponse {
    /// Where the data came from
    pub source: String,
    /// Number of records
    pub rows: usize,
    /// Observed year bounds
    pub bounds: Option<YearBounds>,
    /// First rows, all columns
    pub sample: DataSample,
}

/// Filtered records
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    /// The range actually applied after clamping
    pub selection: RangeSelection,
    /// Number of records returned
    pub count: usize,
    pub records: Vec<Record>,
}

// ============================================
// CHART DTOs
// ============================================

/// Chart for one range
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// The range actually applied after clamping
    pub selection: RangeSelection,
    /// Renderer-agnostic chart description
    pub spec: ChartSpec,
    /// Plotly figure for the same chart
    pub figure: Value,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or unhealthy
    pub status: String,
    /// Data source status: ok or error
    pub source: String,
    /// Data source kind
    pub source_kind: String,
    /// Data source location
    pub source_location: String,
    /// Error from the last probe, if it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_error: Option<String>,
    /// When a caching source last refreshed its dataset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_fetched_at: Option<DateTime<Utc>>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
