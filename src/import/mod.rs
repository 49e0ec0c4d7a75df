//! Transaction import
//!
//! Reads CSV or JSON exports into normalized [`Transaction`]s. Both formats
//! produce [`RawRecord`]s first; [`normalize_records`] then applies one set of
//! rules:
//!
//! - a missing or unreadable date skips the row (it cannot be placed in a month)
//! - a missing or non-numeric amount is coerced to zero and counted
//! - the type column decides income vs expense, falling back to the amount's sign
//! - a blank category becomes "Uncategorized"

pub mod csv;
pub mod json;

use std::path::Path;

use chrono::{DateTime, NaiveDate};

use crate::error::{FincastError, FincastResult};
use crate::models::{Money, Transaction, TransactionKind};

pub use self::csv::{detect_mapping_from_headers, parse_csv, ColumnMapping};
pub use self::json::parse_json;

/// Date formats tried after the preferred one
const FALLBACK_DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d/%m/%Y", "%d/%m/%y", "%Y/%m/%d", "%m-%d-%Y",
    "%d-%m-%Y", "%d %b %Y",
];

/// Amount as found in the source, before parsing
#[derive(Debug, Clone, PartialEq)]
pub enum AmountField {
    /// One signed amount column
    Signed(String),
    /// Separate debit (outflow) and credit (inflow) columns
    Split { debit: String, credit: String },
    /// Already numeric (JSON)
    Number(f64),
    Missing,
}

/// One row of input before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based data row number, for messages
    pub row: usize,
    pub date: Option<String>,
    pub amount: AmountField,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// Result of an import: the transactions plus what was tolerated along the way
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub transactions: Vec<Transaction>,
    /// Rows whose amount could not be read and was treated as zero
    pub coerced_amounts: Vec<usize>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportSummary {
    pub fn rows_read(&self) -> usize {
        self.transactions.len() + self.skipped.len()
    }
}

/// Parse a date using the preferred format, then the common fallbacks
pub fn parse_date(s: &str, preferred_format: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    std::iter::once(preferred_format)
        .chain(FALLBACK_DATE_FORMATS)
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn resolve_amount(field: &AmountField) -> Option<Money> {
    let parse_optional = |text: &str| -> Option<Money> {
        if text.trim().is_empty() {
            Some(Money::zero())
        } else {
            Money::parse(text).ok()
        }
    };

    match field {
        AmountField::Signed(text) => Money::parse(text).ok(),
        AmountField::Split { debit, credit } => {
            let debit = parse_optional(debit)?;
            let credit = parse_optional(credit)?;
            Some(credit.abs() - debit.abs())
        }
        AmountField::Number(value) => Money::checked_from_f64(*value),
        AmountField::Missing => None,
    }
}

/// Turn raw rows into transactions, recording coerced and skipped rows
pub fn normalize_records(
    records: impl IntoIterator<Item = RawRecord>,
    date_format: &str,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for record in records {
        let Some(date) = record
            .date
            .as_deref()
            .and_then(|d| parse_date(d, date_format))
        else {
            let reason = match record.date.as_deref() {
                Some(d) if !d.trim().is_empty() => format!("could not parse date '{}'", d.trim()),
                _ => "missing date".to_string(),
            };
            tracing::warn!(row = record.row, %reason, "skipping row");
            summary.skipped.push(SkippedRow {
                row: record.row,
                reason,
            });
            continue;
        };

        let amount = match resolve_amount(&record.amount) {
            Some(amount) => amount,
            None => {
                tracing::warn!(
                    row = record.row,
                    amount = ?record.amount,
                    "unreadable amount, treating as zero"
                );
                summary.coerced_amounts.push(record.row);
                Money::zero()
            }
        };

        let kind = match record.kind.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.parse::<TransactionKind>().unwrap_or_else(|e| {
                tracing::warn!(row = record.row, error = %e, "inferring type from amount sign");
                TransactionKind::from_sign(amount)
            }),
            _ => TransactionKind::from_sign(amount),
        };

        let mut txn = Transaction::new(date, amount, kind);
        if let Some(category) = record.category {
            txn = txn.with_category(category);
        }
        if let Some(description) = record.description {
            txn = txn.with_description(description);
        }
        summary.transactions.push(txn);
    }

    tracing::debug!(
        imported = summary.transactions.len(),
        coerced = summary.coerced_amounts.len(),
        skipped = summary.skipped.len(),
        "normalized records"
    );
    summary
}

/// Load transactions from a file, choosing the parser by extension
///
/// `.json` files go through the JSON reader; anything else is read as CSV
/// with its columns detected from the header row.
pub fn load_transactions(path: &Path, date_format: &str) -> FincastResult<ImportSummary> {
    let source_name = path.display().to_string();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| FincastError::import(&source_name, format!("cannot read file: {}", e)))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let records = if is_json {
        parse_json(&contents).map_err(|e| FincastError::import(&source_name, e.to_string()))?
    } else {
        parse_csv(contents.as_bytes(), None)
            .map_err(|e| FincastError::import(&source_name, e.to_string()))?
    };

    let summary = normalize_records(records, date_format);
    tracing::info!(
        file = %source_name,
        transactions = summary.transactions.len(),
        skipped = summary.skipped.len(),
        "loaded transactions"
    );
    Ok(summary)
}
