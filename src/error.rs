//! Custom error types for fincast
//!
//! The analysis functions never fail; these errors come from the edges of the
//! crate: reading settings, importing transaction files and writing reports.

use thiserror::Error;

/// The main error type for fincast operations
#[derive(Error, Debug)]
pub enum FincastError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Invalid user-supplied values (thresholds, business types, formats)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transaction file could not be imported
    #[error("Import error in {source_name}: {reason}")]
    Import { source_name: String, reason: String },

    /// Report could not be written
    #[error("Export error: {0}")]
    Export(String),
}

impl FincastError {
    /// Create an import error tied to a file or stream name
    pub fn import(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Import {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FincastError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FincastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FincastError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for FincastError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for fincast operations
pub type FincastResult<T> = Result<T, FincastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FincastError::Config("bad horizon".into());
        assert_eq!(err.to_string(), "Configuration error: bad horizon");
    }

    #[test]
    fn test_import_error() {
        let err = FincastError::import("bank.csv", "no date column");
        assert_eq!(err.to_string(), "Import error in bank.csv: no date column");
    }

    #[test]
    fn test_is_validation() {
        assert!(FincastError::Validation("x".into()).is_validation());
        assert!(!FincastError::Export("x".into()).is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FincastError = io_err.into();
        assert!(matches!(err, FincastError::Io(_)));
    }
}
