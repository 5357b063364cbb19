//! Record export formats
//!
//! Shared by the `/api/v1/export` endpoint and the CLI.

use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;

use crate::dataset::Record;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Ndjson,
    Table,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Ndjson => "application/x-ndjson",
            ExportFormat::Table => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Ndjson => "ndjson",
            ExportFormat::Table => "txt",
        }
    }

    pub fn render(&self, records: &[Record]) -> ExportResult<String> {
        match self {
            ExportFormat::Csv => to_csv(records),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            ExportFormat::Ndjson => to_ndjson(records),
            ExportFormat::Table => Ok(to_table(records)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "ndjson" => Ok(ExportFormat::Ndjson),
            "table" | "txt" => Ok(ExportFormat::Table),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// CSV with a header row
pub fn to_csv(records: &[Record]) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// One JSON object per line
pub fn to_ndjson(records: &[Record]) -> ExportResult<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}

/// Fixed-width text table for terminals
pub fn to_table(records: &[Record]) -> String {
    let width = records
        .iter()
        .map(|r| r.department.len())
        .max()
        .unwrap_or(0)
        .max("Department".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:<7}  {:>7}  {:>9}  {:>9}",
        "Department", "Month", "Revenue", "Margin(%)", "Headcount"
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<width$}  {:<7}  {:>7}  {:>9.2}  {:>9}",
            r.department,
            r.month.label(),
            r.revenue,
            r.margin_percent,
            r.headcount
        );
    }
    out
}
