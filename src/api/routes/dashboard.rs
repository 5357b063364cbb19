//! Dashboard Route
//!
//! - GET / - Interactive dashboard page

use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use crate::api::dto::parse_filter_params;
use crate::api::error::ApiResult;
use crate::api::page::render_dashboard;
use crate::api::state::AppState;

/// GET /
///
/// Runs the pipeline for the submitted controls and renders the page.
/// An empty department selection renders a warning banner, not an error.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Html<String>> {
    let params = parse_filter_params(&pairs)?;
    let rendered = state.pipeline.render(&params)?;

    tracing::info!(
        selected = rendered.records.len(),
        frames = rendered.figure.frames.len(),
        warning = rendered.warning.is_some(),
        "Rendered dashboard"
    );

    Ok(Html(render_dashboard(&state.config, &rendered)?))
}
