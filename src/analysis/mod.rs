//! Cash-flow analysis
//!
//! Pure functions that turn a transaction list into monthly totals, a
//! moving-average forecast, anomaly alerts and benchmark recommendations.
//! Nothing here performs I/O or holds state, so every function is safe to
//! call from any thread.

pub mod aggregate;
pub mod anomaly;
pub mod benchmark;
pub mod forecast;

pub use aggregate::aggregate_by_month;
pub use anomaly::{detect_anomalies, AnomalyDetector, AnomalyThresholds};
pub use benchmark::{compute_benchmarks, generate_recommendations, Benchmark};
pub use forecast::{generate_forecast, DEFAULT_HORIZON};
