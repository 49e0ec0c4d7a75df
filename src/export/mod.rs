//! Export module for fincast
//!
//! Writes an [`InsightReport`] in one of several formats:
//! - Terminal: tables for reading in a shell
//! - JSON: machine-readable full report
//! - YAML: human-readable full report
//! - CSV: the monthly history and forecast only

pub mod json;
pub mod yaml;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{FincastError, FincastResult};
use crate::reports::InsightReport;

pub use json::{export_report_json, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Tables for the terminal
    Terminal,
    /// JSON (full report)
    Json,
    /// YAML (full report, human-readable)
    Yaml,
    /// CSV (history and forecast only)
    Csv,
}

/// Write a report to any writer
pub fn write_report<W: Write>(
    report: &InsightReport,
    format: ReportFormat,
    writer: &mut W,
    currency_symbol: &str,
) -> FincastResult<()> {
    match format {
        ReportFormat::Terminal => writer
            .write_all(report.format_terminal(currency_symbol).as_bytes())
            .map_err(|e| FincastError::Export(e.to_string())),
        ReportFormat::Json => export_report_json(report, writer, true),
        ReportFormat::Yaml => export_report_yaml(report, writer),
        ReportFormat::Csv => report.export_csv(writer),
    }
}

/// Write a report to a file, creating parent directories as needed
pub fn save_report(
    report: &InsightReport,
    format: ReportFormat,
    output: &Path,
    currency_symbol: &str,
) -> FincastResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            FincastError::Export(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(output).map_err(|e| {
        FincastError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);
    write_report(report, format, &mut writer, currency_symbol)?;
    writer
        .flush()
        .map_err(|e| FincastError::Export(e.to_string()))?;

    tracing::info!(path = %output.display(), ?format, "report written");
    Ok(())
}
