//! Filter stage
//!
//! Narrows a dataset by an inclusive date interval and a department
//! selection. Filtering borrows from the dataset and never mutates it.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::error::{DatasetError, DatasetResult};
use super::types::{Dataset, Month, Record};

/// Inclusive date interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> DatasetResult<Self> {
        if start > end {
            return Err(DatasetError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Span from the dataset's first month to its last month
    pub fn for_dataset(dataset: &Dataset) -> Option<Self> {
        let start = dataset.first_month()?.first_day();
        let end = dataset.last_month()?.first_day();
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A month is in range when its first day is
    pub fn contains_month(&self, month: Month) -> bool {
        self.contains(month.first_day())
    }
}

/// Parse a `YYYY-MM-DD` date as sent by a date picker
pub fn parse_date(s: &str) -> DatasetResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DatasetError::InvalidDate(s.to_string()))
}

/// Which departments pass the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentSelection {
    /// No explicit choice: every department
    All,
    /// Exactly these labels, possibly none
    Only(BTreeSet<String>),
}

impl DepartmentSelection {
    pub fn only<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(labels.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self::Only(BTreeSet::new())
    }

    pub fn includes(&self, department: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(department),
        }
    }

    /// True for an explicit empty selection
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Only(set) if set.is_empty())
    }

    /// Labels selected in `dataset`, in dataset order
    pub fn resolve<'a>(&self, dataset: &'a Dataset) -> Vec<&'a str> {
        dataset
            .departments()
            .iter()
            .filter(|d| self.includes(d))
            .map(|d| d.as_str())
            .collect()
    }
}

/// Non-fatal conditions surfaced to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterWarning {
    NoDepartmentsSelected,
}

impl FilterWarning {
    pub fn message(&self) -> &'static str {
        match self {
            FilterWarning::NoDepartmentsSelected => "Select at least one department",
        }
    }
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Filter predicates driven by the dashboard controls
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub range: DateRange,
    pub departments: DepartmentSelection,
}

impl Filter {
    pub fn new(range: DateRange, departments: DepartmentSelection) -> Self {
        Self { range, departments }
    }

    /// Filter that keeps the whole dataset
    pub fn everything(dataset: &Dataset) -> Option<Self> {
        DateRange::for_dataset(dataset).map(|range| Self::new(range, DepartmentSelection::All))
    }

    /// Reject selections naming departments the dataset does not have
    pub fn check_departments(&self, dataset: &Dataset) -> DatasetResult<()> {
        if let DepartmentSelection::Only(set) = &self.departments {
            if let Some(unknown) = set.iter().find(|d| !dataset.has_department(d)) {
                return Err(DatasetError::UnknownDepartment(unknown.clone()));
            }
        }
        Ok(())
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.departments.includes(&record.department) && self.range.contains_month(record.month)
    }

    /// Apply the filter, keeping dataset order
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        if self.departments.is_empty() {
            tracing::warn!("{}", FilterWarning::NoDepartmentsSelected);
            return FilteredView {
                records: Vec::new(),
                warning: Some(FilterWarning::NoDepartmentsSelected),
            };
        }

        let records: Vec<&Record> = dataset.records().iter().filter(|r| self.matches(r)).collect();

        tracing::debug!(
            kept = records.len(),
            total = dataset.len(),
            start = %self.range.start(),
            end = %self.range.end(),
            "Filtered dataset"
        );

        FilteredView {
            records,
            warning: None,
        }
    }
}

/// Borrowed subset of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
    warning: Option<FilterWarning>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn warning(&self) -> Option<FilterWarning> {
        self.warning
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct months present, ascending
    pub fn months(&self) -> Vec<Month> {
        let set: BTreeSet<Month> = self.records.iter().map(|r| r.month).collect();
        set.into_iter().collect()
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}
