//! Data Transfer Objects
//!
//! Query-string parsing and JSON response types for the endpoints.

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::error::{ApiError, ApiResult};
use crate::dataset::{parse_date, DepartmentSelection, Filter, FilterWarning, Month, Record};
use crate::export::ExportFormat;
use crate::pipeline::FilterParams;

// ============================================
// QUERY PARAMETERS
// ============================================

/// Parse the dashboard controls from raw query pairs
///
/// Pairs are taken raw because `department` repeats. `from`/`to` are
/// `YYYY-MM-DD`; an empty value means "not set". If any `department`
/// key is present the selection is exactly its non-empty values, so a
/// lone `department=` selects nothing. Unknown keys are ignored.
pub fn parse_filter_params(pairs: &[(String, String)]) -> ApiResult<FilterParams> {
    let mut params = FilterParams::default();

    for (key, value) in pairs {
        let value = value.trim();
        match key.as_str() {
            "from" if !value.is_empty() => set_once(&mut params.from, "from", parse_date(value)?)?,
            "to" if !value.is_empty() => set_once(&mut params.to, "to", parse_date(value)?)?,
            "department" => {
                let selected = params.departments.get_or_insert_with(Vec::new);
                if !value.is_empty() && !selected.iter().any(|d| d == value) {
                    selected.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    Ok(params)
}

fn set_once(slot: &mut Option<NaiveDate>, key: &str, date: NaiveDate) -> ApiResult<()> {
    match slot {
        Some(existing) if *existing != date => Err(ApiError::Validation(format!(
            "{} given more than once",
            key
        ))),
        _ => {
            *slot = Some(date);
            Ok(())
        }
    }
}

/// Export format from the `format` key, defaulting to CSV
pub fn parse_export_format(pairs: &[(String, String)]) -> ApiResult<ExportFormat> {
    match pairs.iter().rev().find(|(k, _)| k == "format") {
        Some((_, v)) => Ok(v.parse()?),
        None => Ok(ExportFormat::Csv),
    }
}

// ============================================
// RESPONSES
// ============================================

/// Operator-facing warning
#[derive(Debug, Serialize)]
pub struct WarningDto {
    pub code: FilterWarning,
    pub message: String,
}

impl From<FilterWarning> for WarningDto {
    fn from(warning: FilterWarning) -> Self {
        Self {
            code: warning,
            message: warning.message().to_string(),
        }
    }
}

/// Resolved filter echoed back to the caller
#[derive(Debug, Serialize)]
pub struct FilterDto {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// `null` when every department is selected
    pub departments: Option<Vec<String>>,
}

impl From<&Filter> for FilterDto {
    fn from(filter: &Filter) -> Self {
        let departments = match &filter.departments {
            DepartmentSelection::All => None,
            DepartmentSelection::Only(set) => Some(set.iter().cloned().collect()),
        };
        Self {
            from: filter.range.start(),
            to: filter.range.end(),
            departments,
        }
    }
}

/// Filtered records
#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub records: Vec<Record>,
    pub total: usize,
    pub filter: FilterDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<WarningDto>,
}

/// Full generated dataset
#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub seed: u64,
    pub departments: Vec<String>,
    pub months: Vec<Month>,
    pub records: Vec<Record>,
    pub total: usize,
}

/// Values for the dashboard controls
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub departments: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Generator status
    pub dataset: String,
    /// Rows the generator produces
    pub rows: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
