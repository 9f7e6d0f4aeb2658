#![doc(test(attr(deny(warnings))))]

//! Family Ledger records money movements between household members, keeps
//! them in a tabular sheet, and derives filtered views, monthly per-person
//! nets, and all-time balances.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod session;
pub mod storage;
pub mod utils;

/// Initializes global tracing. Safe to call more than once.
pub fn init() {
    utils::init_tracing();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
