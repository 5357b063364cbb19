//! Seeded synthetic data generator
//!
//! Produces one record per (department, month) pair. Numeric columns are
//! drawn column by column from a `StdRng` seeded with the configured seed,
//! so the same spec always yields the same dataset.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use super::error::{DatasetError, DatasetResult};
use super::types::{Dataset, Month, Record};

/// Default seed for reproducible output
pub const DEFAULT_SEED: u64 = 42;

/// Default year the months are drawn from
pub const DEFAULT_YEAR: i32 = 2023;

/// Default department labels
pub const DEFAULT_DEPARTMENTS: [&str; 6] = ["HR", "BU2", "BU3", "Finance", "IT", "Sales"];

/// Half-open numeric range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

/// Validated generator inputs
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    seed: u64,
    year: i32,
    departments: Vec<String>,
    months: Vec<Month>,
    revenue: ValueRange<u32>,
    margin: ValueRange<f64>,
    headcount: ValueRange<u32>,
}

impl DatasetSpec {
    /// Validate generator inputs
    pub fn new(
        seed: u64,
        year: i32,
        departments: Vec<String>,
        revenue: ValueRange<u32>,
        margin: ValueRange<f64>,
        headcount: ValueRange<u32>,
    ) -> DatasetResult<Self> {
        validate_departments(&departments)?;
        check_range("revenue", revenue.min as f64, revenue.max as f64)?;
        check_range("margin", margin.min, margin.max)?;
        check_range("headcount", headcount.min as f64, headcount.max as f64)?;
        let months = Month::months_of_year(year)?;

        Ok(Self {
            seed,
            year,
            departments,
            months,
            revenue,
            margin,
            headcount,
        })
    }

    /// Same spec with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn revenue(&self) -> ValueRange<u32> {
        self.revenue
    }

    pub fn margin(&self) -> ValueRange<f64> {
        self.margin
    }

    pub fn headcount(&self) -> ValueRange<u32> {
        self.headcount
    }

    /// Number of rows `generate` will produce
    pub fn row_count(&self) -> usize {
        self.departments.len() * self.months.len()
    }
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            year: DEFAULT_YEAR,
            departments: DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
            months: (1..=12)
                .filter_map(|m| Month::new(DEFAULT_YEAR, m))
                .collect(),
            revenue: ValueRange::new(100, 1000),
            margin: ValueRange::new(5.0, 25.0),
            headcount: ValueRange::new(50, 500),
        }
    }
}

fn validate_departments(departments: &[String]) -> DatasetResult<()> {
    if departments.is_empty() {
        return Err(DatasetError::NoDepartments);
    }

    let mut seen = HashSet::new();
    for name in departments {
        if name.trim().is_empty() {
            return Err(DatasetError::BlankDepartment);
        }
        if !seen.insert(name.as_str()) {
            return Err(DatasetError::DuplicateDepartment(name.clone()));
        }
    }
    Ok(())
}

fn check_range(field: &str, min: f64, max: f64) -> DatasetResult<()> {
    // Uniform sampling needs a finite width as well as finite bounds
    if min.is_finite() && max.is_finite() && min < max && (max - min).is_finite() {
        Ok(())
    } else {
        Err(DatasetError::InvalidRange {
            field: field.to_string(),
            min,
            max,
        })
    }
}

/// Generate the dataset described by `spec`
pub fn generate(spec: &DatasetSpec) -> Dataset {
    let rows = spec.row_count();
    let mut rng = StdRng::seed_from_u64(spec.seed);

    let revenues: Vec<u32> = (0..rows)
        .map(|_| rng.gen_range(spec.revenue.min..spec.revenue.max))
        .collect();
    let margins: Vec<f64> = (0..rows)
        .map(|_| rng.gen_range(spec.margin.min..spec.margin.max))
        .collect();
    let headcounts: Vec<u32> = (0..rows)
        .map(|_| rng.gen_range(spec.headcount.min..spec.headcount.max))
        .collect();

    let cells = spec
        .departments
        .iter()
        .flat_map(|d| spec.months.iter().map(move |m| (d, *m)));

    let records: Vec<Record> = cells
        .zip(revenues)
        .zip(margins)
        .zip(headcounts)
        .map(|((((department, month), revenue), margin_percent), headcount)| Record {
            department: department.clone(),
            month,
            revenue,
            margin_percent,
            headcount,
        })
        .collect();

    tracing::debug!(seed = spec.seed, rows = records.len(), "Generated dataset");

    Dataset::from_parts(spec.departments.clone(), spec.months.clone(), records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_shape() {
        let dataset = generate(&DatasetSpec::default());
        assert_eq!(dataset.len(), 72);
        assert_eq!(dataset.departments().len(), 6);
        assert_eq!(dataset.months().len(), 12);
    }

    #[test]
    fn test_same_seed_same_output() {
        let spec = DatasetSpec::default();
        let a = generate(&spec);
        let b = generate(&spec);
        assert_eq!(a, b);

        let json_a = serde_json::to_string(a.records()).unwrap();
        let json_b = serde_json::to_string(b.records()).unwrap();
        assert_eq!(json_a, json_b);
    }

    #[test]
    fn test_different_seed_different_output() {
        let a = generate(&DatasetSpec::default());
        let b = generate(&DatasetSpec::default().with_seed(7));
        assert_ne!(a.records(), b.records());
    }

    #[test]
    fn test_each_pair_exactly_once() {
        let dataset = generate(&DatasetSpec::default());
        let pairs: HashSet<(String, Month)> = dataset
            .records()
            .iter()
            .map(|r| (r.department.clone(), r.month))
            .collect();
        assert_eq!(pairs.len(), dataset.len());
    }

    #[test]
    fn test_department_major_order() {
        let dataset = generate(&DatasetSpec::default());
        let first: Vec<&str> = dataset.records()[..12]
            .iter()
            .map(|r| r.department.as_str())
            .collect();
        assert!(first.iter().all(|d| *d == "HR"));
        assert_eq!(dataset.records()[12].department, "BU2");
        assert_eq!(dataset.records()[0].month.label(), "2023-01");
        assert_eq!(dataset.records()[11].month.label(), "2023-12");
    }

    #[test]
    fn test_values_within_ranges() {
        let dataset = generate(&DatasetSpec::default());
        for r in dataset.records() {
            assert!((100..1000).contains(&r.revenue));
            assert!(r.margin_percent >= 5.0 && r.margin_percent < 25.0);
            assert!((50..500).contains(&r.headcount));
        }
    }

    #[test]
    fn test_spec_validation() {
        let ok = |deps: Vec<&str>| {
            DatasetSpec::new(
                1,
                2023,
                deps.into_iter().map(String::from).collect(),
                ValueRange::new(100, 1000),
                ValueRange::new(5.0, 25.0),
                ValueRange::new(50, 500),
            )
        };

        assert!(ok(vec!["A", "B"]).is_ok());
        assert_eq!(ok(vec![]).unwrap_err(), DatasetError::NoDepartments);
        assert_eq!(ok(vec!["A", " "]).unwrap_err(), DatasetError::BlankDepartment);
        assert_eq!(
            ok(vec!["A", "A"]).unwrap_err(),
            DatasetError::DuplicateDepartment("A".to_string())
        );

        let bad_range = DatasetSpec::new(
            1,
            2023,
            vec!["A".to_string()],
            ValueRange::new(1000, 100),
            ValueRange::new(5.0, 25.0),
            ValueRange::new(50, 500),
        );
        assert!(matches!(
            bad_range,
            Err(DatasetError::InvalidRange { ref field, .. }) if field == "revenue"
        ));

        let nan_margin = DatasetSpec::new(
            1,
            2023,
            vec!["A".to_string()],
            ValueRange::new(100, 1000),
            ValueRange::new(f64::NAN, 25.0),
            ValueRange::new(50, 500),
        );
        assert!(nan_margin.is_err());
    }

    #[test]
    fn test_overflowing_width_rejected() {
        let wide = DatasetSpec::new(
            1,
            2023,
            vec!["A".to_string()],
            ValueRange::new(100, 1000),
            ValueRange::new(-1.0e308, 1.0e308),
            ValueRange::new(50, 500),
        );
        assert!(matches!(
            wide,
            Err(DatasetError::InvalidRange { ref field, .. }) if field == "margin"
        ));

        let widest_ok = DatasetSpec::new(
            1,
            2023,
            vec!["A".to_string()],
            ValueRange::new(100, 1000),
            ValueRange::new(-1.0e307, 1.0e307),
            ValueRange::new(50, 500),
        )
        .unwrap();
        assert_eq!(generate(&widest_ok).len(), 12);
    }

    #[test]
    fn test_default_matches_validated_defaults() {
        let validated = DatasetSpec::new(
            DEFAULT_SEED,
            DEFAULT_YEAR,
            DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect(),
            ValueRange::new(100, 1000),
            ValueRange::new(5.0, 25.0),
            ValueRange::new(50, 500),
        )
        .unwrap();
        assert_eq!(validated, DatasetSpec::default());
    }
}
