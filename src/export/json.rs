//! JSON Export functionality
//!
//! Writes the insight report as JSON. The `schema_version` field at the top
//! of the document lets consumers detect format changes.

use std::io::Write;

use crate::error::{FincastError, FincastResult};
use crate::reports::InsightReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Export the report to JSON
pub fn export_report_json<W: Write>(
    report: &InsightReport,
    writer: &mut W,
    pretty: bool,
) -> FincastResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)
    } else {
        serde_json::to_writer(&mut *writer, report)
    }
    .map_err(|e| FincastError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| FincastError::Export(e.to_string()))?;
    Ok(())
}
