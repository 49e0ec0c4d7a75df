//! fincast - cash-flow forecasting and anomaly detection
//!
//! This library turns a list of business transactions into monthly totals,
//! a moving-average forecast, anomaly alerts and benchmark-driven cost
//! recommendations.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data types (money, months, transactions, alerts)
//! - `analysis`: Aggregation, forecasting, anomaly rules and benchmarks
//! - `import`: CSV and JSON transaction readers
//! - `reports`: The combined insight report
//! - `export`: JSON, YAML and CSV report writers
//! - `display`: Terminal tables
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `fincast` binary
//! - `logging`: `tracing` subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use fincast::analysis::{aggregate_by_month, detect_anomalies, generate_forecast};
//!
//! let periods = aggregate_by_month(&transactions);
//! let forecast = generate_forecast(&periods, 3);
//! let alerts = detect_anomalies(&transactions, &forecast);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod reports;

pub use error::{FincastError, FincastResult};
