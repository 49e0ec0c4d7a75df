//! Insight Report
//!
//! Runs the full pipeline (aggregation, forecast, anomaly detection,
//! benchmarks) once and keeps every result together for display or export.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::{
    aggregate_by_month, compute_benchmarks, generate_forecast, generate_recommendations,
    AnomalyDetector, Benchmark,
};
use crate::config::settings::{validate_horizon, Settings};
use crate::display::{
    double_separator, format_alert_table, format_benchmark_table, format_forecast_table,
    format_header, format_recommendations, separator,
};
use crate::error::{FincastError, FincastResult};
use crate::export::EXPORT_SCHEMA_VERSION;
use crate::models::{
    AnomalyAlert, BusinessProfile, ForecastPoint, Money, MonthKey, PeriodMetrics, Severity,
    Transaction,
};

const REPORT_WIDTH: usize = 80;

/// Totals over the whole history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub transaction_count: usize,
    pub first_period: Option<MonthKey>,
    pub last_period: Option<MonthKey>,
    pub total_income: Money,
    pub total_expense: Money,
    pub net: Money,
}

impl ReportSummary {
    fn from_periods(transaction_count: usize, periods: &[PeriodMetrics]) -> Self {
        let total_income: Money = periods.iter().map(|p| p.income).sum();
        let total_expense: Money = periods.iter().map(|p| p.expense).sum();
        Self {
            transaction_count,
            first_period: periods.first().map(|p| p.period),
            last_period: periods.last().map(|p| p.period),
            total_income,
            total_expense,
            net: total_income - total_expense,
        }
    }
}

/// Everything fincast derives from one transaction set
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    /// Schema version for compatibility checking
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    /// Application version that created the report
    pub app_version: String,
    pub business_profile: BusinessProfile,
    /// Months projected past the history
    pub horizon: usize,
    pub summary: ReportSummary,
    pub periods: Vec<PeriodMetrics>,
    pub forecast: Vec<ForecastPoint>,
    pub alerts: Vec<AnomalyAlert>,
    pub benchmarks: Vec<Benchmark>,
    pub recommendations: Vec<String>,
}

impl InsightReport {
    /// Generate a report stamped with the current time
    pub fn generate(
        transactions: &[Transaction],
        settings: &Settings,
        horizon: usize,
    ) -> FincastResult<Self> {
        Self::generate_at(transactions, settings, horizon, Utc::now())
    }

    /// Generate a report with a fixed timestamp for both the report and its alerts
    pub fn generate_at(
        transactions: &[Transaction],
        settings: &Settings,
        horizon: usize,
        now: DateTime<Utc>,
    ) -> FincastResult<Self> {
        validate_horizon(horizon)?;
        settings.anomaly_thresholds.validate()?;

        let periods = aggregate_by_month(transactions);
        let forecast = generate_forecast(&periods, horizon);
        let alerts = AnomalyDetector::new(settings.anomaly_thresholds)
            .detect_at(transactions, &forecast, now);
        let profile = settings.business_profile.clone();
        let benchmarks = compute_benchmarks(transactions, &profile);
        let recommendations = generate_recommendations(transactions, &profile);

        tracing::info!(
            periods = periods.len(),
            forecast_points = forecast.len(),
            alerts = alerts.len(),
            "generated insight report"
        );

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: now,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            business_profile: profile,
            horizon,
            summary: ReportSummary::from_periods(transactions.len(), &periods),
            periods,
            forecast,
            alerts,
            benchmarks,
            recommendations,
        })
    }

    /// Highest alert severity, if any alert was raised
    pub fn highest_severity(&self) -> Option<Severity> {
        self.alerts.iter().map(|a| a.severity).max()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format_header("Cash Flow Insight Report", REPORT_WIDTH));
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        match (self.summary.first_period, self.summary.last_period) {
            (Some(first), Some(last)) => {
                output.push_str(&format!("Period: {} to {}\n", first, last));
            }
            _ => output.push_str("Period: no transactions\n"),
        }
        output.push_str(&format!(
            "Business: {}\n",
            self.business_profile.peer_label()
        ));
        output.push_str(&format!(
            "Transactions: {}\n",
            self.summary.transaction_count
        ));
        output.push_str(&format!(
            "Total Income: {}\n",
            self.summary.total_income.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Total Expense: {}\n",
            self.summary.total_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Net: {}\n\n",
            self.summary.net.format_with_symbol(symbol)
        ));

        let sections = [
            (
                format!("FORECAST ({} months)", self.horizon),
                format_forecast_table(&self.forecast, symbol),
            ),
            (
                format!("ANOMALIES ({})", self.alerts.len()),
                format_alert_table(&self.alerts),
            ),
            (
                "INDUSTRY BENCHMARKS".to_string(),
                format_benchmark_table(&self.benchmarks),
            ),
            (
                "RECOMMENDATIONS".to_string(),
                format_recommendations(&self.recommendations),
            ),
        ];

        for (title, body) in sections {
            output.push_str(&title);
            output.push('\n');
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            output.push_str(body.trim_end());
            output.push_str("\n\n");
        }

        output
    }

    /// Export the history and forecast to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FincastResult<()> {
        writeln!(writer, "Month,Period,Income,Expense,Balance,Predicted")
            .map_err(|e| FincastError::Export(e.to_string()))?;

        for point in &self.forecast {
            writeln!(
                writer,
                "{},{},{:.2},{:.2},{:.2},{}",
                point.period.iso(),
                point.label(),
                point.income.to_f64(),
                point.expense.to_f64(),
                point.projected_balance().to_f64(),
                point.predicted
            )
            .map_err(|e| FincastError::Export(e.to_string()))?;
        }

        Ok(())
    }

    /// Export the alerts to CSV format
    pub fn export_alerts_csv<W: Write>(&self, writer: W) -> FincastResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record([
            "Month",
            "Type",
            "Severity",
            "Message",
            "Recommendation",
        ])?;

        for alert in &self.alerts {
            out.write_record([
                alert.period.iso(),
                alert.kind.to_string(),
                alert.severity.to_string(),
                alert.message.clone(),
                alert.recommendation.clone().unwrap_or_default(),
            ])?;
        }

        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertKind;
    use chrono::NaiveDate;

    fn txn_income(month: u32, units: i64) -> Transaction {
        Transaction::income(
            NaiveDate::from_ymd_opt(2024, month, 10).unwrap(),
            Money::from_units(units),
        )
        .with_category("Sales")
    }

    fn txn_expense(month: u32, units: i64, category: &str) -> Transaction {
        Transaction::expense(
            NaiveDate::from_ymd_opt(2024, month, 20).unwrap(),
            Money::from_units(units),
        )
        .with_category(category)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn_income(1, 1000),
            txn_expense(1, 400, "Rent"),
            txn_income(2, 1000),
            txn_expense(2, 400, "Rent"),
            txn_income(3, 700),
            txn_expense(3, 400, "Rent"),
        ]
    }

    #[test]
    fn test_generate() {
        let report =
            InsightReport::generate_at(&sample(), &Settings::default(), 2, DateTime::<Utc>::UNIX_EPOCH)
                .unwrap();

        assert_eq!(report.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(report.periods.len(), 3);
        assert_eq!(report.forecast.len(), 5);
        assert_eq!(report.summary.total_income, Money::from_units(2700));
        assert_eq!(report.summary.net, Money::from_units(1500));
        assert_eq!(report.summary.first_period, Some(MonthKey::new(2024, 1).unwrap()));

        // 1000 -> 700 is a 30% drop
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].kind, AlertKind::RevenueDrop);
        assert_eq!(report.alerts[0].detected_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(report.highest_severity(), Some(Severity::Medium));

        assert_eq!(report.benchmarks[0].category, "rent");
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_generate_rejects_excessive_horizon() {
        let err = InsightReport::generate(&sample(), &Settings::default(), 1000).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_input() {
        let report = InsightReport::generate(&[], &Settings::default(), 3).unwrap();
        assert!(report.periods.is_empty());
        assert!(report.forecast.is_empty());
        assert!(report.alerts.is_empty());
        assert!(report.benchmarks.is_empty());
        assert_eq!(report.highest_severity(), None);

        let output = report.format_terminal("$");
        assert!(output.contains("Period: no transactions"));
        assert!(output.contains("No anomalies detected."));
    }

    #[test]
    fn test_format_terminal() {
        let report = InsightReport::generate(&sample(), &Settings::default(), 3).unwrap();
        let output = report.format_terminal("$");

        assert!(output.contains("Cash Flow Insight Report"));
        assert!(output.contains("Period: Jan 2024 to Mar 2024"));
        assert!(output.contains("Total Income: $2700.00"));
        assert!(output.contains("FORECAST (3 months)"));
        assert!(output.contains("ANOMALIES (1)"));
        assert!(output.contains("Jun 2024"));
        assert!(output.contains("RECOMMENDATIONS"));
    }

    #[test]
    fn test_export_csv() {
        let report = InsightReport::generate(&sample(), &Settings::default(), 1).unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Month,Period,Income,Expense,Balance,Predicted");
        assert_eq!(lines[1], "2024-01,Jan 2024,1000.00,400.00,600.00,false");
        // (1000 + 1000 + 700) / 3 = 900
        assert_eq!(lines[4], "2024-04,Apr 2024,900.00,400.00,500.00,true");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_export_alerts_csv_quotes_messages() {
        let report = InsightReport::generate(&sample(), &Settings::default(), 1).unwrap();
        let mut buffer = Vec::new();
        report.export_alerts_csv(&mut buffer).unwrap();

        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("Month,Type,Severity,Message,Recommendation\n"));
        assert!(csv.contains("2024-03,Revenue drop,medium,"));
    }
}
