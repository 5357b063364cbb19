//! Synthetic dataset
//!
//! - **types**: `Month`, `Record`, `Dataset`
//! - **generator**: seeded department × month generator
//! - **filter**: date-range and department filtering
//! - **error**: error types
//!
//! # Example
//!
//! ```rust
//! use scatterboard::dataset::{generate, DatasetSpec, DateRange, DepartmentSelection, Filter};
//!
//! let dataset = generate(&DatasetSpec::default());
//! assert_eq!(dataset.len(), 72);
//!
//! let range = DateRange::for_dataset(&dataset).unwrap();
//! let view = Filter::new(range, DepartmentSelection::only(["HR"])).apply(&dataset);
//! assert_eq!(view.len(), 12);
//! ```

pub mod error;
pub mod filter;
pub mod generator;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use filter::{parse_date, DateRange, DepartmentSelection, Filter, FilterWarning, FilteredView};
pub use generator::{
    generate, DatasetSpec, ValueRange, DEFAULT_DEPARTMENTS, DEFAULT_SEED, DEFAULT_YEAR,
};
pub use types::{Dataset, Month, Record};
