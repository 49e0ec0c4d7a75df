//! CSV transaction reader
//!
//! Columns are located by header name. A file whose first row already parses
//! as a date is treated as headerless and read positionally as
//! `date, amount, type, category, description`.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::{parse_date, AmountField, RawRecord};
use crate::error::FincastResult;

/// Column positions for a CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: Option<usize>,
    /// Single signed amount column
    pub amount_column: Option<usize>,
    /// Outflow column, used with `credit_column` when there is no amount column
    pub debit_column: Option<usize>,
    /// Inflow column
    pub credit_column: Option<usize>,
    /// Income/expense column
    pub type_column: Option<usize>,
    pub category_column: Option<usize>,
    pub description_column: Option<usize>,
    /// Whether the first row is a header
    pub has_header: bool,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: Some(0),
            amount_column: Some(1),
            debit_column: None,
            credit_column: None,
            type_column: Some(2),
            category_column: Some(3),
            description_column: Some(4),
            has_header: true,
        }
    }
}

impl ColumnMapping {
    /// Positional layout for files without a header row
    pub fn headerless() -> Self {
        Self {
            has_header: false,
            ..Self::default()
        }
    }

    fn empty() -> Self {
        Self {
            date_column: None,
            amount_column: None,
            debit_column: None,
            credit_column: None,
            type_column: None,
            category_column: None,
            description_column: None,
            has_header: true,
        }
    }
}

fn looks_like_data_row(record: &StringRecord) -> bool {
    record
        .get(0)
        .and_then(|first| parse_date(first, "%Y-%m-%d"))
        .is_some()
}

/// Detect the column mapping from the first row of a file
pub fn detect_mapping_from_headers(headers: &StringRecord) -> ColumnMapping {
    if looks_like_data_row(headers) {
        return ColumnMapping::headerless();
    }

    let mut mapping = ColumnMapping::empty();

    for (idx, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();

        if h == "type" || h == "kind" || h.contains("transaction type") || h == "direction" {
            mapping.type_column.get_or_insert(idx);
        } else if h.contains("date") || h.contains("posted") || h == "when" {
            mapping.date_column.get_or_insert(idx);
        } else if h.contains("debit") || h.contains("outflow") || h.contains("withdrawal") {
            mapping.debit_column.get_or_insert(idx);
        } else if h.contains("credit") || h.contains("inflow") || h.contains("deposit") {
            mapping.credit_column.get_or_insert(idx);
        } else if h.contains("amount") || h == "value" || h == "total" {
            mapping.amount_column.get_or_insert(idx);
        } else if h.contains("category") || h.contains("account") {
            mapping.category_column.get_or_insert(idx);
        } else if h.contains("description")
            || h.contains("memo")
            || h.contains("payee")
            || h.contains("merchant")
            || h.contains("note")
            || h == "name"
        {
            mapping.description_column.get_or_insert(idx);
        }
    }

    if mapping.amount_column.is_some() {
        mapping.debit_column = None;
        mapping.credit_column = None;
    }

    tracing::debug!(?mapping, "detected CSV columns");
    mapping
}

fn cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|col| record.get(col))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn amount_field(record: &StringRecord, mapping: &ColumnMapping) -> AmountField {
    if mapping.amount_column.is_some() {
        return match cell(record, mapping.amount_column) {
            Some(text) => AmountField::Signed(text),
            None => AmountField::Missing,
        };
    }

    let debit = cell(record, mapping.debit_column);
    let credit = cell(record, mapping.credit_column);
    if debit.is_none() && credit.is_none() {
        return AmountField::Missing;
    }
    AmountField::Split {
        debit: debit.unwrap_or_default(),
        credit: credit.unwrap_or_default(),
    }
}

/// Read CSV rows into raw records
///
/// Without an explicit `mapping`, columns are detected from the first row.
/// Only structural CSV failures are errors; bad cell values are left for
/// normalization.
pub fn parse_csv<R: Read>(input: R, mapping: Option<ColumnMapping>) -> FincastResult<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let rows: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let mapping = mapping.unwrap_or_else(|| detect_mapping_from_headers(first));
    let skip = usize::from(mapping.has_header);

    let records = rows
        .iter()
        .skip(skip)
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .enumerate()
        .map(|(idx, row)| RawRecord {
            row: idx + 1,
            date: cell(row, mapping.date_column),
            amount: amount_field(row, &mapping),
            kind: cell(row, mapping.type_column),
            category: cell(row, mapping.category_column),
            description: cell(row, mapping.description_column),
        })
        .collect();

    Ok(records)
}
