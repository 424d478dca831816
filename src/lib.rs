//! # Debtscope
//!
//! Lebanon External Debt Dashboard - an interactive web dashboard that fetches
//! a remote CSV of external debt figures (1960-2022) and renders a line chart
//! and a scatter plot, each filtered by its own year-range slider.
//!
//! ## Modules
//!
//! - [`dataset`]: Records, CSV parsing and the year-range filter
//! - [`chart`]: Chart specifications and Plotly output
//! - [`source`]: Where the dataset comes from (HTTP, cache)
//! - [`dashboard`]: Session state and HTML rendering
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: Live slider updates
//!
//! ## Quick Start
//!
//! ```rust
//! use debtscope::chart::bind_line_chart;
//! use debtscope::dataset::{Dataset, RangeSelection, Record};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new(2008, 44.0),
//!     Record::new(2009, 60.0),
//!     Record::new(2010, 80.0),
//! ]);
//!
//! let view = dataset.filter(RangeSelection::new(2008, 2009));
//! let chart = bind_line_chart(&view);
//!
//! assert_eq!(chart.points.len(), 2);
//! assert_eq!(chart.title, "External Debt Trend (Filtered by Year Range)");
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod source;
pub mod websocket;

// Re-export top-level types for convenience
pub use dataset::{
    filter, parse_csv, parse_csv_str, DataSample, Dataset, DatasetError, FilteredView,
    RangeSelection, Record, YearBounds,
};

pub use chart::{bind_line_chart, bind_scatter_chart, ChartKind, ChartPoint, ChartSpec};

pub use source::{
    CachedSource, DataSource, HttpCsvSource, HttpSourceConfig, SourceError, StaticSource,
};

pub use dashboard::{ChartPanel, DashboardSession, DashboardView, SessionState};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, SourceConfig};
