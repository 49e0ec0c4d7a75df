//! Configuration module for fincast
//!
//! - Platform-aware path resolution
//! - User settings persistence (horizon, thresholds, business profile)

pub mod paths;
pub mod settings;

pub use paths::FincastPaths;
pub use settings::Settings;
