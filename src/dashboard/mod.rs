//! Dashboard
//!
//! The presentation layer: per-viewer session state, the render-ready view
//! model, and the HTML page.
//!
//! ```text
//! Interaction:
//!   slider change → fetch dataset → filter (affected chart) → bind → render
//! ```

pub mod commentary;
pub mod page;
pub mod session;
pub mod view;

pub use page::{escape_html, render_error_page, render_page};
pub use session::{DashboardSession, SessionState};
pub use view::{ChartPanel, DashboardView};
