//! Animated scatter chart
//!
//! - **figure**: serializable plotly.js figure types
//! - **builder**: maps filtered records to a figure

pub mod builder;
pub mod figure;

pub use builder::{ChartBuilder, ChartConfig, PALETTE};
pub use figure::{Figure, Frame, Layout, Trace};
