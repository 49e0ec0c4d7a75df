//! Path management for fincast
//!
//! ## Path Resolution Order
//!
//! 1. `FINCAST_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/fincast` on Linux, `~/Library/Application Support/fincast`
//!    on macOS, `%APPDATA%\fincast\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FincastError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINCAST_DATA_DIR";

/// Manages all paths used by fincast
#[derive(Debug, Clone)]
pub struct FincastPaths {
    base_dir: PathBuf,
}

impl FincastPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FincastError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default location for written reports
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Ensure the base and reports directories exist
    pub fn ensure_directories(&self) -> Result<(), FincastError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FincastError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.reports_dir())
            .map_err(|e| FincastError::Io(format!("Failed to create reports directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FincastError> {
    ProjectDirs::from("", "", "fincast")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FincastError::Config("Could not determine a config directory".into()))
}
