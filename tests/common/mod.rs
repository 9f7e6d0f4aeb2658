#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use family_ledger::{
    ledger::{Ledger, Record, TransactionType},
    storage::JsonSheetStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A sheet store pointing at a fresh, not yet created file.
pub fn sheet_store() -> (JsonSheetStore, PathBuf) {
    let path = temp_base().join("sheet.json");
    (JsonSheetStore::new(&path), path)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A small household ledger spanning two months and every record type.
pub fn household() -> Ledger {
    Ledger::from_records(vec![
        Record::new(1200.0, "Employer", "Ana", "salary", Some(date(2024, 1, 2)), TransactionType::Income),
        Record::new(80.0, "Ana", "Market", "groceries", Some(date(2024, 1, 9)), TransactionType::Expense),
        Record::new(50.0, "Ana", "Rui", "allowance", Some(date(2024, 1, 15)), TransactionType::Transfer),
        Record::new(20.0, "Rui", "Cinema", "movie night", Some(date(2024, 2, 3)), TransactionType::Expense),
        Record::new(15.0, "Ana", "Ana", "moved to savings", Some(date(2024, 2, 10)), TransactionType::Transfer),
        Record::new(5.0, "Rui", "Ana", "returned change", None, TransactionType::Transfer),
    ])
}
