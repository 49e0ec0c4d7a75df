//! Table views for periods, forecasts, alerts and benchmarks

use tabled::{settings::Style, Table, Tabled};

use super::format::{format_percentage, format_points, severity_tag, truncate};
use crate::analysis::Benchmark;
use crate::models::{AnomalyAlert, ForecastPoint, PeriodMetrics};

/// Longest alert message shown before truncation
const MESSAGE_WIDTH: usize = 72;

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Tabled)]
struct BenchmarkRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Typical")]
    typical: String,
    #[tabled(rename = "Difference")]
    difference: String,
}

/// Monthly income, expense and balance
pub fn format_period_table(periods: &[PeriodMetrics], symbol: &str) -> String {
    if periods.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = periods.iter().map(|p| PeriodRow {
        month: p.label(),
        income: p.income.format_with_symbol(symbol),
        expense: p.expense.format_with_symbol(symbol),
        balance: p.balance().format_with_symbol(symbol),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// History followed by projected months, marked in the Source column
pub fn format_forecast_table(points: &[ForecastPoint], symbol: &str) -> String {
    if points.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = points.iter().map(|p| ForecastRow {
        month: p.label(),
        income: p.income.format_with_symbol(symbol),
        expense: p.expense.format_with_symbol(symbol),
        balance: p.projected_balance().format_with_symbol(symbol),
        source: if p.predicted { "forecast" } else { "actual" }.to_string(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_alert_table(alerts: &[AnomalyAlert]) -> String {
    if alerts.is_empty() {
        return "No anomalies detected.".to_string();
    }

    let rows = alerts.iter().map(|a| AlertRow {
        severity: severity_tag(a.severity),
        month: a.period.label(),
        kind: a.kind.to_string(),
        message: truncate(&a.message, MESSAGE_WIDTH),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_benchmark_table(benchmarks: &[Benchmark]) -> String {
    if benchmarks.is_empty() {
        return "No benchmarks available (no income recorded).".to_string();
    }

    let rows = benchmarks.iter().map(|b| BenchmarkRow {
        category: b.category.clone(),
        actual: format_percentage(b.actual_ratio * 100.0),
        typical: format_percentage(b.industry_average * 100.0),
        difference: format_points(b.difference),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Numbered recommendation list
pub fn format_recommendations(recommendations: &[String]) -> String {
    recommendations
        .iter()
        .enumerate()
        .map(|(i, rec)| format!("{:>2}. {}\n", i + 1, rec))
        .collect()
}
