use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of money movement a record describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Transfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type `{0}` (expected income, expense or transfer)")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "transfer" => Ok(TransactionType::Transfer),
            _ => Err(UnknownTransactionType(value.to_string())),
        }
    }
}

/// One immutable ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub amount: f64,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Record {
    pub fn new(
        amount: f64,
        from: impl Into<String>,
        to: impl Into<String>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
        kind: TransactionType,
    ) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
            description: description.into(),
            date,
            kind,
        }
    }

    /// Calendar month bucket in `YYYY-MM` form, absent for undated records.
    pub fn month_key(&self) -> Option<String> {
        self.date.map(|date| date.format("%Y-%m").to_string())
    }

    pub fn involves(&self, person: &str) -> bool {
        self.from == person || self.to == person
    }

    pub fn is_self_transaction(&self) -> bool {
        self.from == self.to
    }
}

/// Names the record fields for validation and schema diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Amount,
    From,
    To,
    Description,
    Date,
    Type,
}

impl RecordField {
    /// Column order used by the sheet store and the CSV export.
    pub const COLUMNS: [RecordField; 6] = [
        RecordField::Amount,
        RecordField::From,
        RecordField::To,
        RecordField::Description,
        RecordField::Date,
        RecordField::Type,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            RecordField::Amount => "amount",
            RecordField::From => "from",
            RecordField::To => "to",
            RecordField::Description => "description",
            RecordField::Date => "date",
            RecordField::Type => "type",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Unvalidated input for a new record, as collected from a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub amount: Option<f64>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
}

impl CandidateRecord {
    pub fn complete(
        amount: f64,
        from: impl Into<String>,
        to: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        kind: TransactionType,
    ) -> Self {
        Self {
            amount: Some(amount),
            from: Some(from.into()),
            to: Some(to.into()),
            description: Some(description.into()),
            date: Some(date),
            kind: Some(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_type_parses_case_insensitively() {
        assert_eq!(
            "Transfer".parse::<TransactionType>().unwrap(),
            TransactionType::Transfer
        );
        assert_eq!(
            " INCOME ".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert!("refund".parse::<TransactionType>().is_err());
    }

    #[test]
    fn month_key_uses_year_then_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let record = Record::new(10.0, "A", "B", "", Some(date), TransactionType::Expense);
        assert_eq!(record.month_key().as_deref(), Some("2024-03"));

        let undated = Record::new(10.0, "A", "B", "", None, TransactionType::Expense);
        assert_eq!(undated.month_key(), None);
    }

    #[test]
    fn record_serializes_type_under_its_column_name() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let record = Record::new(100.0, "A", "B", "gift", Some(date), TransactionType::Income);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-01-05");
    }
}
