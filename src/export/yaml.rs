//! YAML Export functionality
//!
//! Same document as the JSON export, preceded by a comment header for
//! readers opening the file by hand.

use std::io::Write;

use crate::error::{FincastError, FincastResult};
use crate::reports::InsightReport;

/// Export the report to YAML format
pub fn export_report_yaml<W: Write>(report: &InsightReport, writer: &mut W) -> FincastResult<()> {
    let header = format!(
        "# fincast insight report\n\
         # Generated: {}\n\
         # App Version: {}\n\
         #\n\
         # Amounts are in currency units. Forecast entries marked\n\
         # `predicted: true` are projections, not recorded activity.\n\n",
        report.generated_at, report.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FincastError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| FincastError::Export(e.to_string()))?;

    Ok(())
}
