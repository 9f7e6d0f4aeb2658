use std::fmt;

use tracing::{info, warn};

use crate::{
    errors::LedgerError,
    ledger::{CandidateRecord, Ledger, Record},
    storage::{ingest, LedgerStore, QuarantinedRow, StoreError},
};

/// Outcome of the most recent load, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadNotice {
    Loaded {
        count: usize,
        quarantined: Vec<QuarantinedRow>,
    },
    Empty,
    Unavailable(String),
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl LoadNotice {
    /// Whether the notice describes a degraded load the user should see.
    pub fn is_warning(&self) -> bool {
        match self {
            LoadNotice::Loaded { quarantined, .. } => !quarantined.is_empty(),
            LoadNotice::Empty => false,
            LoadNotice::Unavailable(_) | LoadNotice::SchemaMismatch { .. } => true,
        }
    }
}

impl fmt::Display for LoadNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadNotice::Loaded { count, quarantined } if quarantined.is_empty() => {
                write!(f, "Loaded {count} transaction(s).")
            }
            LoadNotice::Loaded { count, quarantined } => {
                let rows: Vec<String> = quarantined
                    .iter()
                    .map(|row| format!("row {}: {}", row.index, row.reason))
                    .collect();
                write!(
                    f,
                    "Loaded {count} transaction(s); skipped {} invalid row(s): {}",
                    quarantined.len(),
                    rows.join("; ")
                )
            }
            LoadNotice::Empty => f.write_str("The sheet is empty. Starting with an empty ledger."),
            LoadNotice::Unavailable(reason) => write!(
                f,
                "Sheet unavailable ({reason}). Starting with an empty ledger."
            ),
            LoadNotice::SchemaMismatch { expected, found } => write!(
                f,
                "Sheet columns do not match: expected [{}], found [{}]. Starting with an empty ledger.",
                expected.join(", "),
                found.join(", ")
            ),
        }
    }
}

/// One interactive session: the store plus the ledger loaded from it.
///
/// The ledger is loaded on first use and every failure to load degrades to an
/// empty ledger with a [`LoadNotice`] describing why.
pub struct Session {
    store: Box<dyn LedgerStore>,
    current: Option<Ledger>,
    notice: Option<LoadNotice>,
}

impl Session {
    pub fn new(store: Box<dyn LedgerStore>) -> Self {
        Self {
            store,
            current: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &dyn LedgerStore {
        self.store.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn ledger(&mut self) -> &Ledger {
        self.ensure_loaded()
    }

    /// Notice from the last load, if a load happened.
    pub fn notice(&self) -> Option<&LoadNotice> {
        self.notice.as_ref()
    }

    /// Rebuilds the in-memory ledger from the store.
    ///
    /// A degraded load only yields an empty ledger when nothing was loaded
    /// before; otherwise the current ledger is kept and only the notice changes.
    pub fn reload(&mut self) -> &LoadNotice {
        let (loaded, notice) = load_from(self.store.as_ref());
        match (loaded, self.current.is_some()) {
            (Some(ledger), _) => self.current = Some(ledger),
            (None, false) => self.current = Some(Ledger::new()),
            (None, true) => warn!("reload failed; keeping the ledger already in memory"),
        }
        self.notice.insert(notice)
    }

    pub fn append(&mut self, candidate: CandidateRecord) -> Result<Record, LedgerError> {
        self.ensure_loaded();
        let store = self.store.as_ref();
        let ledger = self.current.get_or_insert_with(Ledger::new);
        ledger.append(store, candidate)
    }

    fn ensure_loaded(&mut self) -> &Ledger {
        if self.current.is_none() {
            self.reload();
        }
        self.current.get_or_insert_with(Ledger::new)
    }
}

/// Reads and ingests the store. `None` means the load degraded.
fn load_from(store: &dyn LedgerStore) -> (Option<Ledger>, LoadNotice) {
    let rows = match store.load() {
        Ok(rows) => rows,
        Err(StoreError::Empty) => {
            info!(store = %store.describe(), "sheet is empty");
            return (None, LoadNotice::Empty);
        }
        Err(StoreError::SchemaMismatch { expected, found }) => {
            warn!(?expected, ?found, "sheet schema mismatch");
            return (None, LoadNotice::SchemaMismatch { expected, found });
        }
        Err(err) => {
            warn!(store = %store.describe(), error = %err, "sheet unavailable");
            return (None, LoadNotice::Unavailable(err.to_string()));
        }
    };

    match ingest(rows) {
        Ok(ingested) => {
            let count = ingested.records.len();
            info!(count, quarantined = ingested.quarantined.len(), "ledger loaded");
            (
                Some(Ledger::from_records(ingested.records)),
                LoadNotice::Loaded {
                    count,
                    quarantined: ingested.quarantined,
                },
            )
        }
        Err(StoreError::SchemaMismatch { expected, found }) => {
            warn!(?expected, ?found, "sheet schema mismatch");
            (None, LoadNotice::SchemaMismatch { expected, found })
        }
        Err(err) => {
            warn!(error = %err, "sheet rows could not be ingested");
            (None, LoadNotice::Unavailable(err.to_string()))
        }
    }
}
