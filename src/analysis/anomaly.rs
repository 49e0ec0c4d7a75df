//! Rule-based anomaly detection
//!
//! Three independent passes, reported in this order:
//!
//! 1. revenue drops between consecutive historical months
//! 2. expense spikes between consecutive historical months
//! 3. negative balances in the forecast
//!
//! Alerts from different rules are never merged, even for the same month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::aggregate_by_month;
use crate::error::FincastError;
use crate::models::{
    AlertKind, AnomalyAlert, ForecastPoint, Money, PeriodMetrics, Severity, Transaction,
};

/// Relative-change thresholds for one rule, as fractions (0.2 = 20%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioTiers {
    /// Smallest change that raises an alert (severity low)
    pub alert: f64,
    /// Change at which severity becomes medium
    pub medium: f64,
    /// Change at which severity becomes high
    pub high: f64,
}

impl RatioTiers {
    pub fn classify(&self, change: f64) -> Option<Severity> {
        if change >= self.high {
            Some(Severity::High)
        } else if change >= self.medium {
            Some(Severity::Medium)
        } else if change >= self.alert {
            Some(Severity::Low)
        } else {
            None
        }
    }

    fn validate(&self, name: &str) -> Result<(), FincastError> {
        let finite = self.alert.is_finite() && self.medium.is_finite() && self.high.is_finite();
        if !finite || self.alert <= 0.0 || self.alert > self.medium || self.medium > self.high {
            return Err(FincastError::Validation(format!(
                "{} thresholds must satisfy 0 < alert <= medium <= high (got {} / {} / {})",
                name, self.alert, self.medium, self.high
            )));
        }
        Ok(())
    }
}

/// Deficit sizes (as positive magnitudes) for the balance rule
///
/// Any negative projected balance raises an alert; these decide its severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeficitTiers {
    pub medium: Money,
    pub high: Money,
}

impl DeficitTiers {
    pub fn classify(&self, balance: Money) -> Option<Severity> {
        if !balance.is_negative() {
            None
        } else if balance < -self.high {
            Some(Severity::High)
        } else if balance < -self.medium {
            Some(Severity::Medium)
        } else {
            Some(Severity::Low)
        }
    }
}

/// All thresholds used by the detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    #[serde(default = "default_revenue_drop")]
    pub revenue_drop: RatioTiers,
    #[serde(default = "default_expense_spike")]
    pub expense_spike: RatioTiers,
    #[serde(default = "default_deficit")]
    pub deficit: DeficitTiers,
}

/// Drops of 20% alert, 25% or more is medium, 50% or more is high.
///
/// Medium starts at 25% so that a fall from 1000 to 750 is already medium.
fn default_revenue_drop() -> RatioTiers {
    RatioTiers {
        alert: 0.20,
        medium: 0.25,
        high: 0.50,
    }
}

fn default_expense_spike() -> RatioTiers {
    RatioTiers {
        alert: 0.30,
        medium: 0.40,
        high: 0.50,
    }
}

fn default_deficit() -> DeficitTiers {
    DeficitTiers {
        medium: Money::from_units(1000),
        high: Money::from_units(5000),
    }
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            revenue_drop: default_revenue_drop(),
            expense_spike: default_expense_spike(),
            deficit: default_deficit(),
        }
    }
}

impl AnomalyThresholds {
    pub fn validate(&self) -> Result<(), FincastError> {
        self.revenue_drop.validate("Revenue drop")?;
        self.expense_spike.validate("Expense spike")?;
        if self.deficit.medium.is_negative() || self.deficit.medium > self.deficit.high {
            return Err(FincastError::Validation(format!(
                "Deficit thresholds must satisfy 0 <= medium <= high (got {} / {})",
                self.deficit.medium, self.deficit.high
            )));
        }
        Ok(())
    }
}

/// Applies the three anomaly rules with a given set of thresholds
#[derive(Debug, Clone, Default)]
pub struct AnomalyDetector {
    thresholds: AnomalyThresholds,
}

impl AnomalyDetector {
    pub fn new(thresholds: AnomalyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AnomalyThresholds {
        &self.thresholds
    }

    /// Run all rules, stamping alerts with the current time
    pub fn detect(
        &self,
        transactions: &[Transaction],
        forecast: &[ForecastPoint],
    ) -> Vec<AnomalyAlert> {
        self.detect_at(transactions, forecast, Utc::now())
    }

    /// Run all rules, stamping alerts with `detected_at`
    pub fn detect_at(
        &self,
        transactions: &[Transaction],
        forecast: &[ForecastPoint],
        detected_at: DateTime<Utc>,
    ) -> Vec<AnomalyAlert> {
        let history = aggregate_by_month(transactions);

        let mut alerts = self.revenue_drops(&history, detected_at);
        alerts.extend(self.expense_spikes(&history, detected_at));
        alerts.extend(self.balance_warnings(forecast, detected_at));

        tracing::debug!(
            periods = history.len(),
            forecast_points = forecast.len(),
            alerts = alerts.len(),
            "anomaly detection finished"
        );
        alerts
    }

    /// Month-over-month income drops; pairs with zero prior income are skipped
    pub fn revenue_drops(
        &self,
        history: &[PeriodMetrics],
        detected_at: DateTime<Utc>,
    ) -> Vec<AnomalyAlert> {
        history
            .windows(2)
            .filter_map(|pair| {
                let (prev, curr) = (&pair[0], &pair[1]);
                let drop = -prev.income.change_to(curr.income)?;
                let severity = self.thresholds.revenue_drop.classify(drop)?;

                let message = format!(
                    "Revenue dropped {:.1}% in {} (from {} to {})",
                    drop * 100.0,
                    curr.label(),
                    prev.income,
                    curr.income
                );
                let alert = AnomalyAlert::new(
                    AlertKind::RevenueDrop,
                    curr.period,
                    severity,
                    message,
                    detected_at,
                );
                Some(alert.with_recommendation(format!(
                    "Follow up on outstanding invoices and review the sales pipeline for {}.",
                    curr.label()
                )))
            })
            .collect()
    }

    /// Month-over-month expense increases; pairs with zero prior expense are skipped
    pub fn expense_spikes(
        &self,
        history: &[PeriodMetrics],
        detected_at: DateTime<Utc>,
    ) -> Vec<AnomalyAlert> {
        history
            .windows(2)
            .filter_map(|pair| {
                let (prev, curr) = (&pair[0], &pair[1]);
                let spike = prev.expense.change_to(curr.expense)?;
                let severity = self.thresholds.expense_spike.classify(spike)?;

                let message = format!(
                    "Expenses rose {:.1}% in {} (from {} to {})",
                    spike * 100.0,
                    curr.label(),
                    prev.expense,
                    curr.expense
                );
                let alert = AnomalyAlert::new(
                    AlertKind::ExpenseSpike,
                    curr.period,
                    severity,
                    message,
                    detected_at,
                );
                Some(alert.with_recommendation(format!(
                    "Check {} for one-off purchases or newly added recurring charges.",
                    curr.label()
                )))
            })
            .collect()
    }

    /// Negative income-minus-expense on any forecast point
    pub fn balance_warnings(
        &self,
        forecast: &[ForecastPoint],
        detected_at: DateTime<Utc>,
    ) -> Vec<AnomalyAlert> {
        forecast
            .iter()
            .filter_map(|point| {
                let balance = point.projected_balance();
                let severity = self.thresholds.deficit.classify(balance)?;

                let message = if point.predicted {
                    format!("Projected deficit of {} in {}", balance.abs(), point.label())
                } else {
                    format!("Deficit of {} recorded in {}", balance.abs(), point.label())
                };
                let recommendation = match severity {
                    Severity::High => {
                        "Secure a credit line or cut discretionary spending now to cover the shortfall."
                    }
                    Severity::Medium => {
                        "Defer non-essential purchases and chase receivables before this month."
                    }
                    Severity::Low => "Keep a small cash buffer to absorb the expected shortfall.",
                };
                let alert = AnomalyAlert::new(
                    AlertKind::BalanceWarning,
                    point.period,
                    severity,
                    message,
                    detected_at,
                );
                Some(alert.with_recommendation(recommendation))
            })
            .collect()
    }
}

/// Run the default rules over a transaction list and its forecast
pub fn detect_anomalies(
    transactions: &[Transaction],
    forecast: &[ForecastPoint],
) -> Vec<AnomalyAlert> {
    AnomalyDetector::default().detect(transactions, forecast)
}
