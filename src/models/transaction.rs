//! Transaction model
//!
//! A transaction is a dated income or expense amount with a category.
//! The sign convention is settled at construction: income keeps the amount it
//! was given, expenses always hold a non-negative magnitude. Everything
//! downstream can then sum amounts without re-checking signs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::period::MonthKey;

/// Category assigned when none is supplied
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Infer the kind from a signed amount (negative is an expense)
    pub fn from_sign(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "credit" | "deposit" | "revenue" | "inflow" | "cr" => Ok(Self::Income),
            "expense" | "debit" | "withdrawal" | "payment" | "outflow" | "dr" => {
                Ok(Self::Expense)
            }
            other => Err(format!("Unknown transaction type: '{}'", other)),
        }
    }
}

/// An immutable, normalized financial transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    amount: Money,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
}

impl Transaction {
    /// Create a transaction of the given kind
    ///
    /// Expense amounts are stored as magnitudes regardless of their sign.
    pub fn new(date: NaiveDate, amount: Money, kind: TransactionKind) -> Self {
        let amount = match kind {
            TransactionKind::Income => amount,
            TransactionKind::Expense => amount.abs(),
        };
        Self {
            date,
            amount,
            kind,
            category: UNCATEGORIZED.to_string(),
            description: String::new(),
        }
    }

    pub fn income(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, amount, TransactionKind::Income)
    }

    pub fn expense(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, amount, TransactionKind::Expense)
    }

    /// Create a transaction whose kind is implied by the amount's sign
    pub fn from_signed(date: NaiveDate, amount: Money) -> Self {
        Self::new(date, amount, TransactionKind::from_sign(amount))
    }

    /// Set the category; blank names fall back to "Uncategorized"
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let category = category.trim();
        self.category = if category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            category.to_string()
        };
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Normalized amount: as given for income, a magnitude for expenses
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The calendar month this transaction falls in
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}]",
            self.date, self.kind, self.amount, self.category
        )
    }
}
