//! Page Route
//!
//! - GET / - The dashboard page
//!
//! Every request is one full render: fetch, filter both charts, bind, emit
//! HTML. A fetch failure aborts the render and shows the error.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::PageParams;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::dashboard::{render_error_page, render_page, DashboardSession};

/// GET /?line_from=&line_to=&scatter_from=&scatter_to=
pub async fn index(State(state): State<Arc<AppState>>, Query(params): Query<PageParams>) -> Response {
    let dataset = match state.source.fetch().await {
        Ok(ds) => ds,
        Err(e) => {
            let err = ApiError::from(e);
            let (status, code) = err.status_and_code();
            tracing::error!(error_code = %code, error_message = %err, "Dashboard render failed");
            return (status, Html(render_error_page(&err.to_string()))).into_response();
        }
    };

    let session = DashboardSession::from_widgets(
        dataset.bounds(),
        (params.line_from, params.line_to),
        (params.scatter_from, params.scatter_to),
    );
    let view = session.view(&dataset);

    tracing::debug!(
        line = %view.line.selection,
        scatter = %view.scatter.selection,
        "Dashboard rendered"
    );

    (StatusCode::OK, Html(render_page(&view))).into_response()
}
