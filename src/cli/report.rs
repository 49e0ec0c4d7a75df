//! CLI command for the full insight report

use std::path::PathBuf;

use clap::Args;

use super::analyze::{load_input, InputArgs};
use crate::config::paths::FincastPaths;
use crate::config::settings::{validate_horizon, Settings};
use crate::error::FincastResult;
use crate::export::{save_report, write_report, ReportFormat};
use crate::models::BusinessType;
use crate::reports::InsightReport;

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: ReportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long, conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write to the reports directory under the data directory
    #[arg(long)]
    pub save: bool,

    /// Months to project (default: from settings)
    #[arg(short = 'n', long)]
    pub horizon: Option<usize>,

    /// Business type for benchmarks (default: from settings)
    #[arg(short, long)]
    pub business_type: Option<BusinessType>,
}

fn extension(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Terminal => "txt",
        ReportFormat::Json => "json",
        ReportFormat::Yaml => "yaml",
        ReportFormat::Csv => "csv",
    }
}

/// File name for a saved report, e.g. `insight-2024-06-30.json`
pub fn default_report_path(paths: &FincastPaths, report: &InsightReport, format: ReportFormat) -> PathBuf {
    paths.reports_dir().join(format!(
        "insight-{}.{}",
        report.generated_at.format("%Y-%m-%d"),
        extension(format)
    ))
}

/// Handle `fincast report`
pub fn handle_report_command(
    paths: &FincastPaths,
    settings: &Settings,
    args: ReportArgs,
) -> FincastResult<()> {
    let horizon = args.horizon.unwrap_or(settings.forecast_horizon);
    validate_horizon(horizon)?;

    let mut settings = settings.clone();
    if let Some(business_type) = args.business_type {
        settings.business_profile.business_type = business_type;
    }

    let transactions = load_input(&args.input, &settings)?;
    let report = InsightReport::generate(&transactions, &settings, horizon)?;
    let symbol = &settings.currency_symbol;

    let output = match (args.output, args.save) {
        (Some(path), _) => Some(path),
        (None, true) => Some(default_report_path(paths, &report, args.format)),
        (None, false) => None,
    };

    match output {
        Some(path) => {
            save_report(&report, args.format, &path, symbol)?;
            println!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report(&report, args.format, &mut stdout.lock(), symbol)?;
        }
    }

    Ok(())
}
