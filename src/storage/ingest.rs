use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::warn;

use crate::ledger::{Record, RecordField, TransactionType};

use super::{expected_columns, Result, Row, StoreError};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Typed records recovered from a load, plus the rows that were set aside.
#[derive(Debug, Default)]
pub struct Ingested {
    pub records: Vec<Record>,
    pub quarantined: Vec<QuarantinedRow>,
}

/// A row that could not be coerced into a record. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedRow {
    pub index: usize,
    pub reason: String,
}

/// Coerces raw store rows into records.
///
/// Fails with [`StoreError::SchemaMismatch`] when no row carries the full set
/// of columns. Individual bad rows are quarantined instead of failing the load.
pub fn ingest(rows: Vec<Row>) -> Result<Ingested> {
    let expected = expected_columns();
    let conforming = rows
        .iter()
        .any(|row| expected.iter().all(|column| row.contains_key(column)));
    if !rows.is_empty() && !conforming {
        let found: BTreeSet<String> = rows.iter().flat_map(|row| row.keys().cloned()).collect();
        return Err(StoreError::SchemaMismatch {
            expected,
            found: found.into_iter().collect(),
        });
    }

    let mut ingested = Ingested::default();
    for (idx, row) in rows.iter().enumerate() {
        match coerce_row(row) {
            Ok(record) => ingested.records.push(record),
            Err(reason) => {
                warn!(row = idx + 1, %reason, "quarantined ledger row");
                ingested.quarantined.push(QuarantinedRow {
                    index: idx + 1,
                    reason,
                });
            }
        }
    }
    Ok(ingested)
}

fn coerce_row(row: &Row) -> std::result::Result<Record, String> {
    let amount = coerce_amount(row.get(RecordField::Amount.column()))?;
    let from = coerce_name(row, RecordField::From)?;
    let to = coerce_name(row, RecordField::To)?;
    let kind = match row.get(RecordField::Type.column()) {
        Some(Value::String(raw)) => raw
            .parse::<TransactionType>()
            .map_err(|err| err.to_string())?,
        _ => return Err("missing `type`".into()),
    };
    let description = match row.get(RecordField::Description.column()) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    };
    let date = match row.get(RecordField::Date.column()) {
        Some(Value::String(raw)) => parse_date(raw),
        _ => None,
    };
    Ok(Record {
        amount,
        from,
        to,
        description,
        date,
        kind,
    })
}

fn coerce_amount(value: Option<&Value>) -> std::result::Result<f64, String> {
    let amount = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| "`amount` is not a number".to_string())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("`amount` must be non-negative, got {amount}"));
    }
    Ok(amount)
}

fn coerce_name(row: &Row, field: RecordField) -> std::result::Result<String, String> {
    match row.get(field.column()) {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(format!("`{field}` must be a non-empty name")),
    }
}

/// Parses the date layouts a sheet is likely to contain.
///
/// Unrecognised input yields `None` rather than an error.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|stamp| stamp.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|stamp| stamp.date_naive())
        })
}
