//! # Scatterboard
//!
//! Synthetic business data rendered as an animated scatter dashboard.
//!
//! ## Pipeline
//!
//! - **Generate**: seeded department × month dataset (revenue, margin, headcount)
//! - **Filter**: inclusive date range and department selection
//! - **Chart**: plotly.js figure with one animation frame per month
//! - **Present**: axum server with date pickers, a department multi-select,
//!   the chart and the raw table
//!
//! ## Modules
//!
//! - [`dataset`]: records, generator and filter stage
//! - [`chart`]: figure types and chart builder
//! - [`pipeline`]: the three stages chained for one request
//! - [`api`]: HTTP server with Axum
//! - [`export`]: CSV / JSON / text renderings of records
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use scatterboard::pipeline::{FilterParams, Pipeline};
//!
//! let pipeline = Pipeline::default();
//! let rendered = pipeline
//!     .render(&FilterParams::default().departments(["HR"]))
//!     .unwrap();
//!
//! assert_eq!(rendered.dataset.len(), 72);
//! assert_eq!(rendered.records.len(), 12);
//! assert_eq!(rendered.figure.frames.len(), 12);
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod export;
pub mod logging;
pub mod pipeline;

pub use dataset::{
    generate, Dataset, DatasetError, DatasetResult, DatasetSpec, DateRange, DepartmentSelection,
    Filter, FilterWarning, FilteredView, Month, Record,
};

pub use chart::{ChartBuilder, ChartConfig, Figure};

pub use pipeline::{FilterParams, Pipeline, Rendered};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use export::{ExportError, ExportFormat};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};
