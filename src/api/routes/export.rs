//! Export Routes
//!
//! Download of the filtered records.
//!
//! - GET /api/v1/export - Export filtered records (csv, json, ndjson)

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::dto::{parse_export_format, parse_filter_params};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/export
///
/// Same filter parameters as `/records`, plus `format` (default csv).
pub async fn export_data(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let format = parse_export_format(&pairs)?;
    let params = parse_filter_params(&pairs)?;
    let rendered = state.pipeline.render(&params)?;

    let body = format.render(&rendered.records)?;

    let filename = format!(
        "scatterboard_seed{}_{}_{}.{}",
        state.pipeline.spec().seed(),
        rendered.filter.range.start().format("%Y%m%d"),
        rendered.filter.range.end().format("%Y%m%d"),
        format.extension()
    );

    tracing::info!(
        format = format.extension(),
        records = rendered.records.len(),
        "Exported records"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
