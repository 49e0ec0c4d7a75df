//! Reports module for fincast
//!
//! The insight report bundles monthly history, the forecast, anomaly alerts
//! and benchmark recommendations for one transaction set.

pub mod insight;

pub use insight::{InsightReport, ReportSummary};
