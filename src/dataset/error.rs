//! Dataset error types
//!
//! Errors raised while validating generator inputs or filter parameters.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building or filtering a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Generator was given no department labels
    #[error("At least one department is required")]
    NoDepartments,

    /// A department label was empty or whitespace
    #[error("Department labels must not be blank")]
    BlankDepartment,

    /// A department label appeared twice
    #[error("Duplicate department: {0}")]
    DuplicateDepartment(String),

    /// A numeric range was empty or not finite
    #[error("Invalid {field} range: min {min} must be less than max {max}")]
    InvalidRange { field: String, min: f64, max: f64 },

    /// Year outside what the calendar can represent
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// Month label not in YYYY-MM form
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Date not in YYYY-MM-DD form
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Date interval with start after end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Selection names a department the dataset does not have
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::UnknownDepartment("Legal".to_string());
        assert_eq!(err.to_string(), "Unknown department: Legal");

        let err = DatasetError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2023-06-01 is after 2023-01-01"
        );
    }
}
