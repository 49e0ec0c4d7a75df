//! Core data models for fincast
//!
//! Transactions come in, monthly metrics, forecast points, alerts and
//! business profiles go out to the analysis and reporting layers.

pub mod alert;
pub mod metrics;
pub mod money;
pub mod period;
pub mod profile;
pub mod transaction;

pub use alert::{AlertKind, AnomalyAlert, Severity};
pub use metrics::{ForecastPoint, PeriodMetrics};
pub use money::Money;
pub use period::MonthKey;
pub use profile::{BusinessProfile, BusinessType};
pub use transaction::{Transaction, TransactionKind, UNCATEGORIZED};
