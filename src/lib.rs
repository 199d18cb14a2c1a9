//! Volatility charts for option quote exports.
//!
//! - [`compute`] turns raw quotes into per-row implied and underlying volatility
//! - [`data`] loads the resulting CSV as a columnar dataset
//! - [`chart`] builds and renders the dual-axis, difference and overlay views

pub mod chart;
pub mod compute;
pub mod data;
pub mod error;

pub use crate::error::{Result, VolChartError};
