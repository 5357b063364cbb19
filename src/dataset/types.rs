//! Core data types for the synthetic business dataset
//!
//! - `Month`: a calendar month, anchored on its first day
//! - `Record`: one department/month row
//! - `Dataset`: the immutable table produced by the generator

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{DatasetError, DatasetResult};

/// A calendar month
///
/// Stored as the first day of the month so that it compares directly
/// against picker dates. Serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(NaiveDate);

impl Month {
    /// Create a month, returning None for an invalid year/month pair
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// All twelve months of a year, in order
    pub fn months_of_year(year: i32) -> DatasetResult<Vec<Month>> {
        (1..=12)
            .map(|m| Month::new(year, m).ok_or(DatasetError::InvalidYear(year)))
            .collect()
    }

    /// Parse a `YYYY-MM` label
    pub fn parse(label: &str) -> DatasetResult<Self> {
        NaiveDate::parse_from_str(&format!("{}-01", label.trim()), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DatasetError::InvalidMonth(label.to_string()))
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// `YYYY-MM` label, used for frame names and table cells
    pub fn label(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl TryFrom<String> for Month {
    type Error = DatasetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.label()
    }
}

/// One synthetic row: a department's figures for a month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Department label
    pub department: String,
    /// Month the figures belong to
    pub month: Month,
    /// Revenue for the month
    pub revenue: u32,
    /// Margin in percent
    pub margin_percent: f64,
    /// Number of employees, drawn as bubble size
    pub headcount: u32,
}

/// Immutable table of generated records
///
/// Rows are department-major: every month of the first department,
/// then every month of the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    departments: Vec<String>,
    months: Vec<Month>,
    records: Vec<Record>,
}

impl Dataset {
    pub(crate) fn from_parts(
        departments: Vec<String>,
        months: Vec<Month>,
        records: Vec<Record>,
    ) -> Self {
        Self {
            departments,
            months,
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Department labels in generation order
    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    /// Months in ascending order
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_department(&self, name: &str) -> bool {
        self.departments.iter().any(|d| d == name)
    }

    pub fn first_month(&self) -> Option<Month> {
        self.months.first().copied()
    }

    pub fn last_month(&self) -> Option<Month> {
        self.months.last().copied()
    }
}
