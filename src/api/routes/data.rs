//! Data Routes
//!
//! JSON views of each pipeline stage.
//!
//! - GET /api/v1/dataset - Full generated dataset
//! - GET /api/v1/records - Filtered records
//! - GET /api/v1/chart - Figure for the filtered records
//! - GET /api/v1/options - Values for the dashboard controls

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    parse_filter_params, DatasetResponse, FilterDto, OptionsResponse, RecordsResponse,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::Figure;
use crate::dataset::DateRange;

/// GET /api/v1/dataset
pub async fn get_dataset(State(state): State<Arc<AppState>>) -> Json<DatasetResponse> {
    let dataset = state.pipeline.generate();

    Json(DatasetResponse {
        seed: state.pipeline.spec().seed(),
        departments: dataset.departments().to_vec(),
        months: dataset.months().to_vec(),
        total: dataset.len(),
        records: dataset.records().to_vec(),
    })
}

/// GET /api/v1/records
///
/// Query: `from`, `to`, repeated `department`.
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<RecordsResponse>> {
    let params = parse_filter_params(&pairs)?;
    let rendered = state.pipeline.render(&params)?;

    Ok(Json(RecordsResponse {
        total: rendered.records.len(),
        filter: FilterDto::from(&rendered.filter),
        warning: rendered.warning.map(Into::into),
        records: rendered.records,
    }))
}

/// GET /api/v1/chart
///
/// Returns a plotly.js figure: `data`, `layout`, `frames`.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Figure>> {
    let params = parse_filter_params(&pairs)?;
    let rendered = state.pipeline.render(&params)?;
    Ok(Json(rendered.figure))
}

/// GET /api/v1/options
pub async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let dataset = state.pipeline.generate();
    let span = DateRange::for_dataset(&dataset);

    Json(OptionsResponse {
        departments: dataset.departments().to_vec(),
        min_date: span.map(|s| s.start()),
        max_date: span.map(|s| s.end()),
    })
}
