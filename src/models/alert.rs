//! Anomaly alert model
//!
//! Alerts are produced fresh on every detection run and are never stored by
//! this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::period::MonthKey;

/// Which rule raised the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    RevenueDrop,
    ExpenseSpike,
    BalanceWarning,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RevenueDrop => write!(f, "Revenue drop"),
            Self::ExpenseSpike => write!(f, "Expense spike"),
            Self::BalanceWarning => write!(f, "Balance warning"),
        }
    }
}

/// Three-level ordinal severity; `High` compares greatest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A single anomaly found in the history or the forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyAlert {
    pub kind: AlertKind,
    /// Month the alert refers to
    pub period: MonthKey,
    pub message: String,
    pub severity: Severity,
    pub detected_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl AnomalyAlert {
    pub fn new(
        kind: AlertKind,
        period: MonthKey,
        severity: Severity,
        message: impl Into<String>,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            period,
            message: message.into(),
            severity,
            detected_at,
            recommendation: None,
        }
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}
