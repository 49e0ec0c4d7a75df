//! Display formatting for terminal output
//!
//! Tables are rendered with `tabled`; everything here returns a `String` so
//! callers decide where output goes.

pub mod format;
pub mod tables;

pub use format::{double_separator, format_header, format_percentage, separator, truncate};
pub use tables::{
    format_alert_table, format_benchmark_table, format_forecast_table, format_period_table,
    format_recommendations,
};
