//! Ledger records and the in-memory ledger they live in.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;

pub use ledger::Ledger;
pub use record::{CandidateRecord, Record, RecordField, TransactionType, UnknownTransactionType};
