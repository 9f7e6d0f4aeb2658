//! Pure computations over a loaded ledger.

pub mod services;
