//! Debtscope HTTP Server
//!
//! The dashboard's presentation shell, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard (slider values in the query string)
//!
//! ## Data
//! - `GET /api/v1/dataset` - Row count, year bounds and sample rows
//! - `GET /api/v1/records` - Records inside `?from=&to=`
//! - `GET /api/v1/charts/:kind` - Line or scatter chart for `?from=&to=`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Live slider updates
//!
//! # Example
//!
//! ```rust,ignore
//! use debtscope::api::{serve, ApiConfig, AppState};
//! use debtscope::source::{HttpCsvSource, HttpSourceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(HttpCsvSource::new(HttpSourceConfig::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(source, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::websocket::websocket_handler;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dataset", get(routes::dataset::summary))
        .route("/records", get(routes::dataset::records))
        .route("/charts/:kind", get(routes::charts::get_chart));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .route("/ws", get(websocket_handler))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins)
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Debtscope dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Debtscope dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Record};
    use crate::source::{CachedSource, DataSource, SourceError, SourceResult, StaticSource};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn location(&self) -> &str {
            "nowhere"
        }

        async fn fetch(&self) -> SourceResult<Arc<Dataset>> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        }
    }

    fn create_test_app() -> Router {
        let dataset = Dataset::new(vec![
            Record::new(2008, 44.0),
            Record::new(2009, 60.0),
            Record::new(2010, 80.0),
        ]);
        let state = AppState::new(Arc::new(StaticSource::new(dataset)), ApiConfig::default());
        build_router(state)
    }

    fn create_failing_app() -> Router {
        build_router(AppState::new(Arc::new(FailingSource), ApiConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(create_failing_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_failing_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["source_kind"], "failing");
    }

    #[tokio::test]
    async fn test_health_reports_cache_refresh() {
        let json = body_json(get(create_test_app(), "/health").await).await;
        assert_eq!(json["status"], "healthy");
        assert!(json.get("dataset_fetched_at").is_none());

        let cached = CachedSource::new(
            StaticSource::new(Dataset::new(vec![Record::new(2008, 44.0)])),
            std::time::Duration::from_secs(60),
        );
        let app = build_router(AppState::new(Arc::new(cached), ApiConfig::default()));
        let json = body_json(get(app, "/health").await).await;
        assert_eq!(json["source_kind"], "cached");
        assert!(json["dataset_fetched_at"].is_string());
    }

    #[tokio::test]
    async fn test_dataset_summary() {
        let response = get(create_test_app(), "/api/v1/dataset").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["rows"], 3);
        assert_eq!(json["bounds"]["min"], 2008);
        assert_eq!(json["bounds"]["max"], 2010);
        assert_eq!(json["sample"]["rows"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_records_in_range() {
        let response = get(create_test_app(), "/api/v1/records?from=2008&to=2009").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["count"], 2);
        assert_eq!(
            json["records"],
            serde_json::json!([
                {"refPeriod": 2008, "Value": 44.0},
                {"refPeriod": 2009, "Value": 60.0}
            ])
        );
    }

    #[tokio::test]
    async fn test_records_defaults_to_full_range() {
        let json = body_json(get(create_test_app(), "/api/v1/records").await).await;
        assert_eq!(json["count"], 3);
        assert_eq!(json["selection"]["lower"], 2008);
        assert_eq!(json["selection"]["upper"], 2010);
    }

    #[tokio::test]
    async fn test_records_inverted_range_is_empty() {
        let json = body_json(get(create_test_app(), "/api/v1/records?from=2010&to=2008").await).await;
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn test_line_chart() {
        let response = get(create_test_app(), "/api/v1/charts/line?from=2009").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["spec"]["kind"], "line");
        assert_eq!(json["spec"]["title"], "External Debt Trend (Filtered by Year Range)");
        assert_eq!(json["spec"]["points"].as_array().unwrap().len(), 2);
        assert_eq!(json["figure"]["data"][0]["mode"], "lines");
    }

    #[tokio::test]
    async fn test_scatter_chart_empty_range() {
        let json = body_json(get(create_test_app(), "/api/v1/charts/scatter?from=2009&to=2008").await).await;
        assert_eq!(json["spec"]["title"], "External Debt Distribution (Filtered by Year Range)");
        assert_eq!(json["spec"]["points"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_chart_kind() {
        let response = get(create_test_app(), "/api/v1/charts/pie").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_range_param() {
        let response = get(create_test_app(), "/api/v1/records?from=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_source_failure_is_bad_gateway() {
        let response = get(create_failing_app(), "/api/v1/records").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "SOURCE_ERROR");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_page_renders() {
        let response = get(create_test_app(), "/?line_from=2008&line_to=2009").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Lebanon&#39;s External Debt Visualizations"));
        assert!(html.contains(r#"name="line_to" min="2008" max="2010" value="2009""#));
        assert!(html.contains(r#"name="scatter_to" min="2008" max="2010" value="2010""#));
    }

    #[tokio::test]
    async fn test_page_fetch_failure() {
        let response = get(create_failing_app(), "/").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let html = body_text(response).await;
        assert!(html.contains("Could not load the debt dataset"));
        assert!(html.contains("connection refused"));
    }
}
