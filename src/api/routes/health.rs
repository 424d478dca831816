//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset can be fetched)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the dataset can be fetched right now.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.source.fetch().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with source details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let probe = state.source.fetch().await;

    let (status, source, source_error) = match probe {
        Ok(_) => ("healthy", "ok", None),
        Err(e) => ("unhealthy", "error", Some(e.to_string())),
    };

    Json(HealthResponse {
        status: status.to_string(),
        source: source.to_string(),
        source_kind: state.source.name().to_string(),
        source_location: state.source.location().to_string(),
        source_error,
        dataset_fetched_at: state.source.fetched_at().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
