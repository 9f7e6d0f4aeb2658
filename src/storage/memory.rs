use std::cell::RefCell;

use crate::ledger::Record;

use super::{record_to_row, LedgerStore, Result, Row, StoreError};

/// In-process sheet used by tests and throwaway sessions.
///
/// Failures can be injected for both directions to exercise degraded paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<Row>>,
    load_failure: Option<String>,
    append_failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows: RefCell::new(rows),
            ..Self::default()
        }
    }

    pub fn with_records(records: &[Record]) -> Self {
        Self::with_rows(records.iter().map(record_to_row).collect())
    }

    /// Every `load` fails as if the backing sheet were unreachable.
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.load_failure = Some(reason.into());
        self
    }

    /// Every `append` fails with the given cause.
    pub fn failing_appends(mut self, reason: impl Into<String>) -> Self {
        self.append_failure = Some(reason.into());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<Vec<Row>> {
        if let Some(reason) = &self.load_failure {
            return Err(StoreError::Unavailable(reason.clone()));
        }
        let rows = self.rows.borrow();
        if rows.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(rows.clone())
    }

    fn append(&self, record: &Record) -> Result<()> {
        if let Some(reason) = &self.append_failure {
            return Err(StoreError::Write(reason.clone()));
        }
        self.rows.borrow_mut().push(record_to_row(record));
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory sheet".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionType;

    #[test]
    fn failures_are_injected_per_direction() {
        let record = Record::new(5.0, "A", "B", "", None, TransactionType::Income);
        let store = MemoryStore::with_records(&[record.clone()]).failing_appends("quota");

        assert_eq!(store.load().unwrap().len(), 1);
        assert_eq!(
            store.append(&record),
            Err(StoreError::Write("quota".into()))
        );
        assert_eq!(store.len(), 1);

        let offline = MemoryStore::new().unavailable("offline");
        assert_eq!(
            offline.load(),
            Err(StoreError::Unavailable("offline".into()))
        );
    }
}
