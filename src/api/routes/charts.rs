//! Chart Routes
//!
//! - GET /api/v1/charts/:kind - Chart spec and Plotly figure for a year range
//!
//! `kind` is `line` or `scatter`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartResponse, RangeParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::{bind, ChartKind};
use crate::dataset::RangeSelection;

/// GET /api/v1/charts/:kind?from=&to=
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<ChartResponse>> {
    let kind: ChartKind = kind.parse().map_err(ApiError::NotFound)?;

    let dataset = state.source.fetch().await?;
    let selection = RangeSelection::from_widget(dataset.bounds(), params.from, params.to);
    let spec = bind(kind, &dataset.filter(selection));

    tracing::debug!(chart = %kind, selection = %selection, points = spec.points.len(), "Chart bound");

    let figure = spec.to_plotly();
    Ok(Json(ChartResponse {
        selection,
        spec,
        figure,
    }))
}
