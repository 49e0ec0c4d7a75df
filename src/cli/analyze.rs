//! CLI commands for the analysis views
//!
//! Each command reads a transaction file, runs the relevant part of the
//! pipeline, and prints tables to stdout.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::analysis::{
    aggregate_by_month, compute_benchmarks, generate_forecast, generate_recommendations,
    AnomalyDetector,
};
use crate::config::settings::{validate_horizon, Settings};
use crate::display::{
    format_alert_table, format_benchmark_table, format_forecast_table, format_period_table,
    format_recommendations,
};
use crate::error::FincastResult;
use crate::export::{save_report, ReportFormat};
use crate::import::load_transactions;
use crate::models::{AnomalyAlert, BusinessType, Money, Transaction};
use crate::reports::InsightReport;

/// Transaction file shared by every analysis command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV or JSON file of transactions
    pub file: PathBuf,

    /// Preferred date format for the file (strftime, e.g. "%d/%m/%Y")
    #[arg(long)]
    pub date_format: Option<String>,
}

/// Load and normalize the input file, reporting tolerated problems on stderr
pub fn load_input(input: &InputArgs, settings: &Settings) -> FincastResult<Vec<Transaction>> {
    let date_format = input
        .date_format
        .as_deref()
        .unwrap_or(settings.date_format.as_str());
    let summary = load_transactions(&input.file, date_format)?;

    if !summary.skipped.is_empty() {
        eprintln!(
            "Warning: skipped {} of {} rows without a usable date",
            summary.skipped.len(),
            summary.rows_read()
        );
    }
    if !summary.coerced_amounts.is_empty() {
        eprintln!(
            "Warning: {} rows had unreadable amounts and were counted as zero",
            summary.coerced_amounts.len()
        );
    }

    Ok(summary.transactions)
}

fn resolve_horizon(horizon: Option<usize>, settings: &Settings) -> FincastResult<usize> {
    let horizon = horizon.unwrap_or(settings.forecast_horizon);
    validate_horizon(horizon)?;
    Ok(horizon)
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Months to project (default: from settings)
    #[arg(short = 'n', long)]
    pub horizon: Option<usize>,

    /// Also write the history and forecast to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Months to project before checking balances (default: from settings)
    #[arg(short = 'n', long)]
    pub horizon: Option<usize>,

    /// Also write the alerts to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BenchmarksArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Business type to compare against (default: from settings)
    #[arg(short, long)]
    pub business_type: Option<BusinessType>,
}

/// Handle `fincast summary`
pub fn handle_summary_command(settings: &Settings, args: SummaryArgs) -> FincastResult<()> {
    let transactions = load_input(&args.input, settings)?;
    let periods = aggregate_by_month(&transactions);
    let symbol = &settings.currency_symbol;

    println!("{}", format_period_table(&periods, symbol));

    if !periods.is_empty() {
        let income: Money = periods.iter().map(|p| p.income).sum();
        let expense: Money = periods.iter().map(|p| p.expense).sum();
        println!();
        println!(
            "{} transactions over {} months",
            transactions.len(),
            periods.len()
        );
        println!("Total income:  {}", income.format_with_symbol(symbol));
        println!("Total expense: {}", expense.format_with_symbol(symbol));
        println!("Net:           {}", (income - expense).format_with_symbol(symbol));
    }

    Ok(())
}

/// Handle `fincast forecast`
pub fn handle_forecast_command(settings: &Settings, args: ForecastArgs) -> FincastResult<()> {
    let horizon = resolve_horizon(args.horizon, settings)?;
    let transactions = load_input(&args.input, settings)?;

    if let Some(output) = args.output {
        let report = InsightReport::generate(&transactions, settings, horizon)?;
        println!("{}", format_forecast_table(&report.forecast, &settings.currency_symbol));
        save_report(&report, ReportFormat::Csv, &output, &settings.currency_symbol)?;
        println!("Forecast exported to: {}", output.display());
        return Ok(());
    }

    let periods = aggregate_by_month(&transactions);
    let forecast = generate_forecast(&periods, horizon);
    println!("{}", format_forecast_table(&forecast, &settings.currency_symbol));

    if !periods.is_empty() && forecast.len() == periods.len() && horizon > 0 {
        println!();
        println!(
            "At least 3 months of history are needed to project; found {}.",
            periods.len()
        );
    }

    Ok(())
}

/// Handle `fincast anomalies`
pub fn handle_anomalies_command(settings: &Settings, args: AnomaliesArgs) -> FincastResult<()> {
    let horizon = resolve_horizon(args.horizon, settings)?;
    let transactions = load_input(&args.input, settings)?;

    if let Some(output) = args.output {
        let report = InsightReport::generate(&transactions, settings, horizon)?;
        print_alerts(&report.alerts);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        report.export_alerts_csv(BufWriter::new(File::create(&output)?))?;
        println!();
        println!("Alerts exported to: {}", output.display());
        return Ok(());
    }

    let forecast = generate_forecast(&aggregate_by_month(&transactions), horizon);
    let alerts = AnomalyDetector::new(settings.anomaly_thresholds).detect(&transactions, &forecast);
    print_alerts(&alerts);

    Ok(())
}

fn print_alerts(alerts: &[AnomalyAlert]) {
    println!("{}", format_alert_table(alerts));

    let advice: Vec<String> = alerts
        .iter()
        .filter_map(|a| a.recommendation.clone())
        .collect();
    if !advice.is_empty() {
        println!();
        println!("Suggested actions:");
        print!("{}", format_recommendations(&advice));
    }
}

/// Handle `fincast benchmarks`
pub fn handle_benchmarks_command(settings: &Settings, args: BenchmarksArgs) -> FincastResult<()> {
    let transactions = load_input(&args.input, settings)?;

    let mut profile = settings.business_profile.clone();
    if let Some(business_type) = args.business_type {
        profile.business_type = business_type;
    }

    println!("Compared with {}", profile.peer_label());
    println!("{}", format_benchmark_table(&compute_benchmarks(&transactions, &profile)));

    println!();
    println!("Recommendations:");
    print!(
        "{}",
        format_recommendations(&generate_recommendations(&transactions, &profile))
    );

    Ok(())
}
