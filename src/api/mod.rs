//! Scatterboard HTTP layer
//!
//! Dashboard page and JSON API, built with Axum. Every request runs the
//! generate → filter → chart pipeline from scratch.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - Controls, animated chart and raw data table
//!
//! ## Data
//! - `GET /api/v1/dataset` - Full generated dataset
//! - `GET /api/v1/records` - Filtered records
//! - `GET /api/v1/chart` - Plotly figure for the filtered records
//! - `GET /api/v1/options` - Department labels and date bounds
//! - `GET /api/v1/export` - Download filtered records
//!
//! All filtered endpoints accept `from=YYYY-MM-DD`, `to=YYYY-MM-DD` and
//! repeated `department=<label>`.
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use scatterboard::api::{serve, ApiConfig, AppState};
//! use scatterboard::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(Pipeline::default(), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dataset", get(routes::data::get_dataset))
        .route("/records", get(routes::data::get_records))
        .route("/chart", get(routes::data::get_chart))
        .route("/options", get(routes::data::get_options))
        .route("/export", get(routes::export::export_data));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::dashboard))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Scatterboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Scatterboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::pipeline::Pipeline;

    fn create_test_app() -> Router {
        build_router(AppState::new(Pipeline::default(), ApiConfig::default()))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = fetch(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (status, _) = fetch(create_test_app(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (status, _) = fetch(create_test_app(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, json) = get_json(create_test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["rows"], 72);
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (status, body) = fetch(create_test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Animated Scatter Plot: Revenue vs Margin by Department"));
        assert!(html.contains("72 of 72 records selected"));
    }

    #[tokio::test]
    async fn test_dashboard_empty_selection_warns() {
        let (status, body) = fetch(create_test_app(), "/?department=").await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Select at least one department"));
    }

    #[tokio::test]
    async fn test_dashboard_bad_date() {
        let (status, json) = get_json(create_test_app(), "/?from=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_FILTER");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_dataset() {
        let (status, json) = get_json(create_test_app(), "/api/v1/dataset").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 72);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["months"][0], "2023-01");
        assert_eq!(json["records"].as_array().unwrap().len(), 72);
    }

    #[tokio::test]
    async fn test_dataset_is_stable_between_requests() {
        let (_, a) = fetch(create_test_app(), "/api/v1/dataset").await;
        let (_, b) = fetch(create_test_app(), "/api/v1/dataset").await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_records_hr_full_year() {
        let (status, json) = get_json(
            create_test_app(),
            "/api/v1/records?from=2023-01-01&to=2023-12-31&department=HR",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 12);
        let records = json["records"].as_array().unwrap();
        assert!(records.iter().all(|r| r["department"] == "HR"));
        assert_eq!(json["filter"]["departments"][0], "HR");
        assert!(json.get("warning").is_none());
    }

    #[tokio::test]
    async fn test_records_empty_selection() {
        let (status, json) = get_json(create_test_app(), "/api/v1/records?department=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 0);
        assert_eq!(json["warning"]["code"], "no_departments_selected");
        assert_eq!(json["warning"]["message"], "Select at least one department");
    }

    #[tokio::test]
    async fn test_records_unknown_department() {
        let (status, json) =
            get_json(create_test_app(), "/api/v1/records?department=Legal").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "UNKNOWN_DEPARTMENT");
    }

    #[tokio::test]
    async fn test_records_inverted_range() {
        let (status, _) = fetch(
            create_test_app(),
            "/api/v1/records?from=2023-06-01&to=2023-01-01",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chart_frames() {
        let (status, json) = get_json(
            create_test_app(),
            "/api/v1/chart?from=2023-04-01&to=2023-06-30&department=BU2&department=Sales",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let frames = json["frames"].as_array().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0]["name"], "2023-04");
        assert_eq!(frames[0]["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["layout"]["xaxis"]["range"][1], 30.0);
    }

    #[tokio::test]
    async fn test_options() {
        let (status, json) = get_json(create_test_app(), "/api/v1/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["departments"].as_array().unwrap().len(), 6);
        assert_eq!(json["min_date"], "2023-01-01");
        assert_eq!(json["max_date"], "2023-12-01");
    }

    #[tokio::test]
    async fn test_export_csv() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/export?department=IT")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("scatterboard_seed42_20230101_20231201.csv"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().skip(1).all(|l| l.starts_with("IT,")));
    }

    #[tokio::test]
    async fn test_export_unknown_format() {
        let (status, json) = get_json(create_test_app(), "/api/v1/export?format=xlsx").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "UNKNOWN_FORMAT");
    }
}
