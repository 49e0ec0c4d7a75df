//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the analysis and report layers.

pub mod analyze;
pub mod report;

pub use analyze::{
    handle_anomalies_command, handle_benchmarks_command, handle_forecast_command,
    handle_summary_command, AnomaliesArgs, BenchmarksArgs, ForecastArgs, InputArgs, SummaryArgs,
};
pub use report::{handle_report_command, ReportArgs};
