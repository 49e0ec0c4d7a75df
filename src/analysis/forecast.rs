//! Moving-average forecast
//!
//! Each projected month is the trailing mean of the last three points, and the
//! projection is fed back into the window for the next month. The series
//! therefore flattens toward its recent mean; it does not extend a slope.

use crate::models::{ForecastPoint, Money, PeriodMetrics};

/// Months projected when the caller does not say otherwise
pub const DEFAULT_HORIZON: usize = 3;

/// Number of trailing points averaged for each projection
pub const WINDOW: usize = 3;

/// Minimum history needed before anything is projected
pub const MIN_HISTORY: usize = 3;

/// Mean of the last `window` values (or all of them if there are fewer),
/// rounded to the cent
pub fn trailing_average(values: &[Money], window: usize) -> Money {
    let start = values.len().saturating_sub(window);
    Money::mean(&values[start..])
}

/// Extend a chronological monthly history by `horizon` projected months
///
/// Historical points come back unchanged with `predicted = false`, followed by
/// `horizon` points with `predicted = true`. With fewer than
/// [`MIN_HISTORY`] months the history is returned as-is and nothing is
/// projected.
pub fn generate_forecast(history: &[PeriodMetrics], horizon: usize) -> Vec<ForecastPoint> {
    let mut points: Vec<ForecastPoint> = history.iter().map(ForecastPoint::from).collect();

    if history.len() < MIN_HISTORY {
        tracing::debug!(
            history = history.len(),
            required = MIN_HISTORY,
            "not enough history to forecast"
        );
        return points;
    }

    let mut incomes: Vec<Money> = points.iter().map(|p| p.income).collect();
    let mut expenses: Vec<Money> = points.iter().map(|p| p.expense).collect();

    for _ in 0..horizon {
        let Some(last) = points.last() else { break };
        let period = last.period.next();
        let income = trailing_average(&incomes, WINDOW);
        let expense = trailing_average(&expenses, WINDOW);

        incomes.push(income);
        expenses.push(expense);
        points.push(ForecastPoint::predicted(period, income, expense));
    }

    tracing::debug!(history = history.len(), horizon, "generated forecast");
    points
}
