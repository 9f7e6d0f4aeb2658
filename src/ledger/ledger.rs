use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::{
    errors::{LedgerError, ValidationError},
    storage::LedgerStore,
};

use super::record::{CandidateRecord, Record, RecordField};

/// Ordered in-memory view of the sheet plus the derived person set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    records: Vec<Record>,
    persons: BTreeSet<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from records already validated at the store boundary.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            ledger.push(record);
        }
        ledger
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Every distinct non-empty name seen as `from` or `to`, sorted.
    pub fn persons(&self) -> &BTreeSet<String> {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates `candidate`, persists it, and only then extends the ledger.
    ///
    /// A store failure leaves the ledger untouched and is returned as
    /// [`LedgerError::AppendFailure`].
    pub fn append(
        &mut self,
        store: &dyn LedgerStore,
        candidate: CandidateRecord,
    ) -> Result<Record, LedgerError> {
        let record = validate(candidate)?;
        if let Err(err) = store.append(&record) {
            warn!(error = %err, "store rejected new transaction");
            return Err(LedgerError::AppendFailure(err));
        }
        info!(
            amount = record.amount,
            from = %record.from,
            to = %record.to,
            kind = %record.kind,
            "transaction appended"
        );
        self.push(record.clone());
        Ok(record)
    }

    fn push(&mut self, record: Record) {
        for name in [&record.from, &record.to] {
            if !name.is_empty() {
                self.persons.insert(name.clone());
            }
        }
        self.records.push(record);
    }
}

fn validate(candidate: CandidateRecord) -> Result<Record, ValidationError> {
    let amount = candidate
        .amount
        .ok_or_else(|| ValidationError::missing(RecordField::Amount))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::invalid(
            RecordField::Amount,
            format!("must be a non-negative number, got {amount}"),
        ));
    }
    let from = required_text(candidate.from, RecordField::From)?;
    let to = required_text(candidate.to, RecordField::To)?;
    let description = required_text(candidate.description, RecordField::Description)?;
    let date = candidate
        .date
        .ok_or_else(|| ValidationError::missing(RecordField::Date))?;
    let kind = candidate
        .kind
        .ok_or_else(|| ValidationError::missing(RecordField::Type))?;

    Ok(Record {
        amount,
        from,
        to,
        description,
        date: Some(date),
        kind,
    })
}

// Blank counts as missing; accepted text is kept verbatim.
fn required_text(value: Option<String>, field: RecordField) -> Result<String, ValidationError> {
    value
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ValidationError::missing(field))
}
