//! Tabular persistence for ledger records.
//!
//! Stores deal in loosely-typed [`Row`]s, the same shape a spreadsheet API
//! hands back. [`ingest`] is the only place rows turn into typed records.

pub mod ingest;
pub mod json_backend;
pub mod memory;

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::ledger::{Record, RecordField};

pub use ingest::{ingest, parse_date, Ingested, QuarantinedRow};
pub use json_backend::JsonSheetStore;
pub use memory::MemoryStore;

/// One untyped row keyed by column name.
pub type Row = Map<String, Value>;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store contains no rows")]
    Empty,
    #[error("Schema mismatch: expected columns [{}], found [{}]", .expected.join(", "), .found.join(", "))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("Store write failed: {0}")]
    Write(String),
}

/// Durable, append-only table of ledger rows.
pub trait LedgerStore {
    fn load(&self) -> Result<Vec<Row>>;
    fn append(&self, record: &Record) -> Result<()>;

    /// Human-readable location of the backing table.
    fn describe(&self) -> String;
}

/// Column names in store order.
pub fn expected_columns() -> Vec<String> {
    RecordField::COLUMNS
        .iter()
        .map(|field| field.column().to_string())
        .collect()
}

/// Serializes a record into the row layout every store writes.
pub fn record_to_row(record: &Record) -> Row {
    let mut row = Row::new();
    let amount = Number::from_f64(record.amount)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(record.amount.to_string()));
    row.insert(RecordField::Amount.column().into(), amount);
    row.insert(
        RecordField::From.column().into(),
        Value::String(record.from.clone()),
    );
    row.insert(
        RecordField::To.column().into(),
        Value::String(record.to.clone()),
    );
    row.insert(
        RecordField::Description.column().into(),
        Value::String(record.description.clone()),
    );
    let date = record
        .date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    row.insert(RecordField::Date.column().into(), Value::String(date));
    row.insert(
        RecordField::Type.column().into(),
        Value::String(record.kind.as_str().into()),
    );
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionType;
    use chrono::NaiveDate;

    #[test]
    fn record_rows_carry_every_column() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let record = Record::new(12.5, "Ana", "Rui", "books", Some(date), TransactionType::Expense);
        let row = record_to_row(&record);

        for column in expected_columns() {
            assert!(row.contains_key(&column), "missing column {column}");
        }
        assert_eq!(row["date"], "2024-02-29");
        assert_eq!(row["type"], "expense");
        assert_eq!(row["amount"].as_f64(), Some(12.5));
    }

    #[test]
    fn schema_mismatch_lists_both_sides() {
        let err = StoreError::SchemaMismatch {
            expected: vec!["amount".into(), "from".into()],
            found: vec!["value".into()],
        };
        let message = err.to_string();
        assert!(message.contains("amount, from"), "unexpected: {message}");
        assert!(message.contains("value"), "unexpected: {message}");
    }
}
