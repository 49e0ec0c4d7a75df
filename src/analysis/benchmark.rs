//! Industry benchmarks and cost-optimization recommendations
//!
//! Spending per category is expressed as a share of total income and
//! compared against a static table of typical ratios for the business type.
//! Recommendations are plain templates over those comparisons.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{BusinessProfile, BusinessType, Money, MonthKey, Transaction};

/// Ratio assumed for categories missing from the benchmark table
pub const DEFAULT_INDUSTRY_RATIO: f64 = 0.15;

/// Percentage points above the benchmark that trigger a targeted warning
pub const OVERSPEND_THRESHOLD_POINTS: f64 = 5.0;

/// Distinct months a subscription category must appear in to count as recurring
pub const RECURRING_MIN_MONTHS: usize = 3;

/// Category name fragments that mark subscription-style spending
const SUBSCRIPTION_MARKERS: [&str; 2] = ["software", "subscription"];

/// Recommendations appended to every run
pub const GENERIC_RECOMMENDATIONS: [&str; 3] = [
    "Review vendor contracts annually and renegotiate rates where volumes have grown.",
    "Keep at least three months of operating expenses in reserve to smooth cash flow.",
    "Invoice promptly and offer early-payment discounts to shorten collection times.",
];

/// One category's spending compared with its industry benchmark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Benchmark {
    /// Lower-cased category name
    pub category: String,
    /// Category spend divided by total income
    pub actual_ratio: f64,
    /// Typical ratio for the business type
    pub industry_average: f64,
    /// `(actual_ratio - industry_average) * 100`, in percentage points
    pub difference: f64,
}

fn benchmark_table(business_type: BusinessType) -> &'static [(&'static str, f64)] {
    match business_type {
        BusinessType::General => &[
            ("rent", 0.10),
            ("payroll", 0.30),
            ("marketing", 0.08),
            ("software", 0.05),
            ("utilities", 0.03),
            ("insurance", 0.03),
            ("travel", 0.03),
            ("office supplies", 0.02),
        ],
        BusinessType::Retail => &[
            ("inventory", 0.50),
            ("cost of goods sold", 0.50),
            ("rent", 0.08),
            ("payroll", 0.15),
            ("marketing", 0.05),
            ("software", 0.02),
            ("utilities", 0.02),
            ("shipping", 0.05),
        ],
        BusinessType::Restaurant => &[
            ("food", 0.30),
            ("food costs", 0.30),
            ("payroll", 0.30),
            ("rent", 0.08),
            ("utilities", 0.04),
            ("marketing", 0.03),
            ("software", 0.01),
            ("supplies", 0.04),
        ],
        BusinessType::Technology => &[
            ("payroll", 0.45),
            ("software", 0.08),
            ("hosting", 0.07),
            ("marketing", 0.12),
            ("rent", 0.05),
            ("travel", 0.02),
            ("professional fees", 0.03),
        ],
        BusinessType::ProfessionalServices => &[
            ("payroll", 0.50),
            ("rent", 0.07),
            ("marketing", 0.05),
            ("software", 0.04),
            ("insurance", 0.03),
            ("travel", 0.04),
            ("professional fees", 0.03),
        ],
        BusinessType::Construction => &[
            ("materials", 0.35),
            ("payroll", 0.25),
            ("equipment", 0.08),
            ("fuel", 0.04),
            ("insurance", 0.05),
            ("subcontractors", 0.15),
            ("software", 0.01),
        ],
        BusinessType::Healthcare => &[
            ("payroll", 0.45),
            ("medical supplies", 0.10),
            ("rent", 0.07),
            ("insurance", 0.06),
            ("software", 0.03),
            ("marketing", 0.03),
        ],
    }
}

/// Typical spend ratio for a category, or [`DEFAULT_INDUSTRY_RATIO`]
///
/// `category` is matched case-insensitively.
pub fn industry_average(business_type: BusinessType, category: &str) -> f64 {
    let category = category.trim().to_lowercase();
    benchmark_table(business_type)
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, ratio)| *ratio)
        .unwrap_or(DEFAULT_INDUSTRY_RATIO)
}

fn normalized_category(txn: &Transaction) -> String {
    txn.category().trim().to_lowercase()
}

/// Compare each expense category's share of income with its benchmark
///
/// Sorted by absolute difference, largest first. Returns an empty list when
/// total income is zero or negative, since no spend ratio can be computed.
pub fn compute_benchmarks(
    transactions: &[Transaction],
    profile: &BusinessProfile,
) -> Vec<Benchmark> {
    let total_income: Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(Transaction::amount)
        .sum();

    if !total_income.is_positive() {
        tracing::debug!(%total_income, "no positive income, skipping benchmarks");
        return Vec::new();
    }

    let mut spend: BTreeMap<String, Money> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *spend.entry(normalized_category(txn)).or_default() += txn.amount().abs();
    }

    let income = total_income.to_f64();
    let mut benchmarks: Vec<Benchmark> = spend
        .into_iter()
        .map(|(category, amount)| {
            let actual_ratio = amount.to_f64() / income;
            let average = industry_average(profile.business_type, &category);
            Benchmark {
                difference: (actual_ratio - average) * 100.0,
                category,
                actual_ratio,
                industry_average: average,
            }
        })
        .collect();

    benchmarks.sort_by(|a, b| b.difference.abs().total_cmp(&a.difference.abs()));

    tracing::debug!(
        categories = benchmarks.len(),
        business_type = profile.business_type.as_str(),
        "computed benchmarks"
    );
    benchmarks
}

/// Subscription-style expense categories seen in at least
/// [`RECURRING_MIN_MONTHS`] distinct months, with their month counts
pub fn recurring_subscriptions(transactions: &[Transaction]) -> Vec<(String, usize)> {
    let mut months: BTreeMap<String, BTreeSet<MonthKey>> = BTreeMap::new();

    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let category = normalized_category(txn);
        if SUBSCRIPTION_MARKERS.iter().any(|m| category.contains(m)) {
            months.entry(category).or_default().insert(txn.month());
        }
    }

    months
        .into_iter()
        .map(|(category, seen)| (category, seen.len()))
        .filter(|(_, count)| *count >= RECURRING_MIN_MONTHS)
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the recommendation list for a set of transactions
///
/// Order: one warning per category more than
/// [`OVERSPEND_THRESHOLD_POINTS`] above its benchmark (largest variance
/// first), one consolidation hint per recurring subscription category, then
/// [`GENERIC_RECOMMENDATIONS`].
pub fn generate_recommendations(
    transactions: &[Transaction],
    profile: &BusinessProfile,
) -> Vec<String> {
    let mut recommendations: Vec<String> = compute_benchmarks(transactions, profile)
        .iter()
        .filter(|b| b.difference > OVERSPEND_THRESHOLD_POINTS)
        .map(|b| {
            format!(
                "{} spending is {:.1}% of revenue, {:.1} points above the {:.1}% typical for {}. \
                 Review {} costs for savings.",
                capitalize(&b.category),
                b.actual_ratio * 100.0,
                b.difference,
                b.industry_average * 100.0,
                profile.peer_label(),
                b.category
            )
        })
        .collect();

    for (category, months) in recurring_subscriptions(transactions) {
        recommendations.push(format!(
            "{} charges recur across {} months. Consolidating overlapping subscriptions \
             could lower fixed costs.",
            capitalize(&category),
            months
        ));
    }

    recommendations.extend(GENERIC_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 5).unwrap()
    }

    fn income(month: u32, units: i64) -> Transaction {
        Transaction::income(date(month), Money::from_units(units))
    }

    fn expense(month: u32, units: i64, category: &str) -> Transaction {
        Transaction::expense(date(month), Money::from_units(units)).with_category(category)
    }

    fn general() -> BusinessProfile {
        BusinessProfile::default()
    }

    #[test]
    fn test_industry_average_lookup_and_default() {
        assert_eq!(industry_average(BusinessType::General, "Rent"), 0.10);
        assert_eq!(industry_average(BusinessType::Restaurant, "food costs"), 0.30);
        assert_eq!(
            industry_average(BusinessType::General, "llama grooming"),
            DEFAULT_INDUSTRY_RATIO
        );
    }

    #[test]
    fn test_compute_benchmarks_ratios() {
        let transactions = vec![
            income(1, 10_000),
            expense(1, 2_000, "Rent"),
            expense(1, -500, "rent"),
            expense(1, 1_000, "Coffee"),
        ];

        let benchmarks = compute_benchmarks(&transactions, &general());
        assert_eq!(benchmarks.len(), 2);

        // rent: 2500 / 10000 = 0.25 vs 0.10 -> +15 points
        let rent = &benchmarks[0];
        assert_eq!(rent.category, "rent");
        assert!((rent.actual_ratio - 0.25).abs() < 1e-9);
        assert!((rent.difference - 15.0).abs() < 1e-9);

        // coffee: 0.10 vs default 0.15 -> -5 points
        let coffee = &benchmarks[1];
        assert_eq!(coffee.industry_average, DEFAULT_INDUSTRY_RATIO);
        assert!((coffee.difference + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_by_absolute_difference() {
        let transactions = vec![
            income(1, 10_000),
            expense(1, 1_100, "marketing"), // +3
            expense(1, 0, "utilities"),     // -3
            expense(1, 4_000, "payroll"),   // +10
        ];
        let categories: Vec<String> = compute_benchmarks(&transactions, &general())
            .into_iter()
            .map(|b| b.category)
            .collect();
        assert_eq!(categories[0], "payroll");
        assert_eq!(categories.len(), 3);
    }

    #[test]
    fn test_no_income_gives_no_benchmarks() {
        let transactions = vec![expense(1, 100, "rent")];
        assert!(compute_benchmarks(&transactions, &general()).is_empty());
    }

    #[test]
    fn test_recurring_subscriptions() {
        let transactions = vec![
            expense(1, 20, "Software"),
            expense(2, 20, "software"),
            expense(3, 20, "Software"),
            expense(1, 9, "Streaming Subscription"),
            expense(1, 9, "Streaming Subscription"),
            expense(2, 9, "Streaming Subscription"),
            expense(1, 50, "Rent"),
            expense(2, 50, "Rent"),
            expense(3, 50, "Rent"),
        ];
        assert_eq!(
            recurring_subscriptions(&transactions),
            vec![("software".to_string(), 3)]
        );
    }

    #[test]
    fn test_generate_recommendations() {
        let transactions = vec![
            income(1, 10_000),
            expense(1, 2_500, "Rent"),
            expense(1, 100, "Software"),
            expense(2, 100, "Software"),
            expense(3, 100, "Software"),
        ];

        let recs = generate_recommendations(&transactions, &general());
        assert_eq!(recs.len(), 1 + 1 + GENERIC_RECOMMENDATIONS.len());
        assert!(recs[0].starts_with("Rent spending is 25.0% of revenue, 15.0 points above"));
        assert!(recs[0].contains("General businesses"));
        assert!(recs[1].starts_with("Software charges recur across 3 months"));
        assert_eq!(recs[2], GENERIC_RECOMMENDATIONS[0]);
    }

    #[test]
    fn test_generic_recommendations_always_present() {
        let recs = generate_recommendations(&[], &general());
        assert_eq!(recs, GENERIC_RECOMMENDATIONS.map(String::from).to_vec());
    }
}
