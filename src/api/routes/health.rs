//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
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
/// Returns 200 once the generator produces the expected number of rows.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_generator(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let generator_ok = check_generator(&state);

    Json(HealthResponse {
        status: if generator_ok { "healthy" } else { "unhealthy" }.to_string(),
        dataset: if generator_ok { "ok" } else { "error" }.to_string(),
        rows: state.pipeline.spec().row_count(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn check_generator(state: &AppState) -> bool {
    let dataset = state.pipeline.generate();
    !dataset.is_empty() && dataset.len() == state.pipeline.spec().row_count()
}
