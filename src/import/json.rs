//! JSON transaction reader
//!
//! Accepts either a bare array of transaction objects or an object with a
//! `transactions` array. Amounts may be numbers or strings.

use serde::Deserialize;
use serde_json::Value;

use super::{AmountField, RawRecord};
use crate::error::FincastResult;

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default, alias = "Date", alias = "posted")]
    date: Option<String>,
    #[serde(default, alias = "value")]
    amount: Option<Value>,
    #[serde(default, rename = "type", alias = "kind")]
    kind: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "memo")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonInput {
    List(Vec<JsonRecord>),
    Wrapped { transactions: Vec<JsonRecord> },
}

fn amount_field(value: Option<Value>) -> AmountField {
    match value {
        None | Some(Value::Null) => AmountField::Missing,
        Some(Value::Number(n)) => n.as_f64().map_or(AmountField::Missing, AmountField::Number),
        Some(Value::String(s)) if s.trim().is_empty() => AmountField::Missing,
        Some(Value::String(s)) => AmountField::Signed(s),
        Some(other) => AmountField::Signed(other.to_string()),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Read JSON transactions into raw records
pub fn parse_json(contents: &str) -> FincastResult<Vec<RawRecord>> {
    let records = match serde_json::from_str::<JsonInput>(contents)? {
        JsonInput::List(records) | JsonInput::Wrapped { transactions: records } => records,
    };

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(idx, r)| RawRecord {
            row: idx + 1,
            date: non_blank(r.date),
            amount: amount_field(r.amount),
            kind: non_blank(r.kind),
            category: non_blank(r.category),
            description: non_blank(r.description),
        })
        .collect())
}
