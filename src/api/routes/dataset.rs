//! Dataset Routes
//!
//! - GET /api/v1/dataset - Row count, year bounds and sample rows
//! - GET /api/v1/records - Records inside a year range

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DatasetSummaryResponse, RangeParams, RecordsResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dataset::RangeSelection;

/// GET /api/v1/dataset
pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<DatasetSummaryResponse>> {
    let dataset = state.source.fetch().await?;

    Ok(Json(DatasetSummaryResponse {
        source: state.source.location().to_string(),
        rows: dataset.len(),
        bounds: dataset.bounds(),
        sample: dataset.sample().clone(),
    }))
}

/// GET /api/v1/records?from=&to=
pub async fn records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<RecordsResponse>> {
    let dataset = state.source.fetch().await?;
    let selection = RangeSelection::from_widget(dataset.bounds(), params.from, params.to);
    let view = dataset.filter(selection);

    tracing::debug!(selection = %selection, count = view.len(), "Records filtered");

    Ok(Json(RecordsResponse {
        selection,
        count: view.len(),
        records: view.into_records(),
    }))
}
