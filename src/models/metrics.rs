//! Per-period totals and forecast points

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::money::Money;
use super::period::MonthKey;

/// Income and expense totals for one calendar month
///
/// The balance is always derived, so `balance = income - expense` holds for
/// every instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodMetrics {
    pub period: MonthKey,
    pub income: Money,
    pub expense: Money,
}

impl PeriodMetrics {
    pub fn new(period: MonthKey, income: Money, expense: Money) -> Self {
        Self {
            period,
            income,
            expense,
        }
    }

    /// An empty bucket for the given month
    pub fn empty(period: MonthKey) -> Self {
        Self::new(period, Money::zero(), Money::zero())
    }

    pub fn balance(&self) -> Money {
        self.income - self.expense
    }

    pub fn label(&self) -> String {
        self.period.label()
    }
}

impl Serialize for PeriodMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PeriodMetrics", 4)?;
        state.serialize_field("period", &self.period)?;
        state.serialize_field("income", &self.income)?;
        state.serialize_field("expense", &self.expense)?;
        state.serialize_field("balance", &self.balance())?;
        state.end()
    }
}

/// One point on a forecast chart: either a historical month or a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastPoint {
    pub period: MonthKey,
    pub income: Money,
    pub expense: Money,
    #[serde(skip_serializing_if = "is_false")]
    pub predicted: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ForecastPoint {
    /// A synthesized (predicted) point
    pub fn predicted(period: MonthKey, income: Money, expense: Money) -> Self {
        Self {
            period,
            income,
            expense,
            predicted: true,
        }
    }

    /// Income minus expense for this point
    pub fn projected_balance(&self) -> Money {
        self.income - self.expense
    }

    pub fn label(&self) -> String {
        self.period.label()
    }
}

impl From<&PeriodMetrics> for ForecastPoint {
    fn from(metrics: &PeriodMetrics) -> Self {
        Self {
            period: metrics.period,
            income: metrics.income,
            expense: metrics.expense,
            predicted: false,
        }
    }
}
