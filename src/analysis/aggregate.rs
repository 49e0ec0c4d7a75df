//! Monthly aggregation of transactions

use std::collections::BTreeMap;

use crate::models::{MonthKey, PeriodMetrics, Transaction, TransactionKind};

/// Group transactions into calendar-month totals
///
/// Income sums the amounts of income transactions, expense sums the
/// magnitudes of expense transactions. Months are returned in chronological
/// order; months with no transactions are not filled in. Empty input gives an
/// empty Vec.
pub fn aggregate_by_month(transactions: &[Transaction]) -> Vec<PeriodMetrics> {
    let mut buckets: BTreeMap<MonthKey, PeriodMetrics> = BTreeMap::new();

    for txn in transactions {
        let month = txn.month();
        let bucket = buckets
            .entry(month)
            .or_insert_with(|| PeriodMetrics::empty(month));

        match txn.kind() {
            TransactionKind::Income => bucket.income += txn.amount(),
            TransactionKind::Expense => bucket.expense += txn.amount(),
        }
    }

    tracing::debug!(
        transactions = transactions.len(),
        periods = buckets.len(),
        "aggregated transactions by month"
    );

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by_month(&[]).is_empty());
    }

    #[test]
    fn test_groups_by_month_and_kind() {
        let transactions = vec![
            Transaction::income(date(2024, 1, 3), Money::from_units(1000)),
            Transaction::income(date(2024, 1, 20), Money::from_units(500)),
            Transaction::expense(date(2024, 1, 21), Money::from_units(-200)),
            Transaction::expense(date(2024, 2, 2), Money::from_units(300)),
        ];

        let periods = aggregate_by_month(&transactions);
        assert_eq!(periods.len(), 2);

        assert_eq!(periods[0].label(), "Jan 2024");
        assert_eq!(periods[0].income, Money::from_units(1500));
        assert_eq!(periods[0].expense, Money::from_units(200));
        assert_eq!(periods[0].balance(), Money::from_units(1300));

        assert_eq!(periods[1].label(), "Feb 2024");
        assert_eq!(periods[1].income, Money::zero());
        assert_eq!(periods[1].expense, Money::from_units(300));
    }

    #[test]
    fn test_sorted_by_date_not_label() {
        let transactions = vec![
            Transaction::income(date(2024, 4, 1), Money::from_units(1)),
            Transaction::income(date(2024, 1, 1), Money::from_units(1)),
            Transaction::income(date(2023, 12, 1), Money::from_units(1)),
            Transaction::income(date(2024, 2, 1), Money::from_units(1)),
        ];

        let labels: Vec<String> = aggregate_by_month(&transactions)
            .iter()
            .map(PeriodMetrics::label)
            .collect();
        assert_eq!(labels, vec!["Dec 2023", "Jan 2024", "Feb 2024", "Apr 2024"]);
    }

    #[test]
    fn test_totals_are_preserved() {
        let transactions = vec![
            Transaction::income(date(2024, 1, 3), Money::from_cents(123_45)),
            Transaction::expense(date(2024, 2, 3), Money::from_cents(-50_00)),
            Transaction::income(date(2024, 3, 3), Money::from_cents(77_01)),
            Transaction::expense(date(2024, 3, 9), Money::from_cents(19_99)),
            Transaction::income(date(2024, 3, 9), Money::from_cents(-5_00)),
        ];

        let periods = aggregate_by_month(&transactions);

        let income: Money = periods.iter().map(|p| p.income).sum();
        let expected_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount())
            .sum();
        assert_eq!(income, expected_income);

        let expense: Money = periods.iter().map(|p| p.expense).sum();
        let expected_expense: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount().abs())
            .sum();
        assert_eq!(expense, expected_expense);
    }

    #[test]
    fn test_same_month_different_years_stay_apart() {
        let transactions = vec![
            Transaction::income(date(2023, 6, 1), Money::from_units(10)),
            Transaction::income(date(2024, 6, 1), Money::from_units(20)),
        ];
        let periods = aggregate_by_month(&transactions);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].label(), "Jun 2023");
        assert_eq!(periods[1].income, Money::from_units(20));
    }
}
