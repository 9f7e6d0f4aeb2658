use thiserror::Error;

use crate::{ledger::RecordField, storage::StoreError};

/// A candidate record was missing or carried an invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ValidationError {
    pub field: RecordField,
    pub reason: String,
}

impl ValidationError {
    pub fn missing(field: RecordField) -> Self {
        Self {
            field,
            reason: "value is required".into(),
        }
    }

    pub fn invalid(field: RecordField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Error type returned by ledger mutations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to append transaction: {0}")]
    AppendFailure(#[source] StoreError),
}

/// Failures while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
