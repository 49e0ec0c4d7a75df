//! User settings for fincast
//!
//! Holds the forecast horizon, anomaly thresholds, the business profile used
//! for benchmarks, and display preferences. Every field has a default so a
//! partial or older `config.json` still loads.

use serde::{Deserialize, Serialize};

use super::paths::FincastPaths;
use crate::analysis::anomaly::AnomalyThresholds;
use crate::analysis::forecast::DEFAULT_HORIZON;
use crate::error::FincastError;
use crate::models::BusinessProfile;

/// Upper bound for the forecast horizon, in months
pub const MAX_HORIZON: usize = 60;

/// User settings for fincast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Number of months to project past the last historical month
    #[serde(default = "default_horizon")]
    pub forecast_horizon: usize,

    /// Thresholds for the revenue, expense and balance rules
    #[serde(default)]
    pub anomaly_thresholds: AnomalyThresholds,

    /// Business profile used to select benchmark ratios
    #[serde(default)]
    pub business_profile: BusinessProfile,

    /// Currency symbol for terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Preferred date format when importing CSV files (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_horizon() -> usize {
    DEFAULT_HORIZON
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            forecast_horizon: default_horizon(),
            anomaly_thresholds: AnomalyThresholds::default(),
            business_profile: BusinessProfile::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FincastPaths) -> Result<Self, FincastError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            tracing::debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FincastError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FincastError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FincastPaths) -> Result<(), FincastError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FincastError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FincastError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the analysis cannot use
    pub fn validate(&self) -> Result<(), FincastError> {
        validate_horizon(self.forecast_horizon)?;
        self.anomaly_thresholds.validate()
    }
}

/// Check a forecast horizon from settings or the command line
pub fn validate_horizon(horizon: usize) -> Result<(), FincastError> {
    if horizon > MAX_HORIZON {
        return Err(FincastError::Validation(format!(
            "Forecast horizon {} exceeds the maximum of {} months",
            horizon, MAX_HORIZON
        )));
    }
    Ok(())
}
