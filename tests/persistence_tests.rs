mod common;

use std::fs;

use common::{date, sheet_store, temp_base};
use family_ledger::{
    errors::LedgerError,
    export::export_to_dir,
    ledger::{CandidateRecord, TransactionType},
    session::{LoadNotice, Session},
    storage::{JsonSheetStore, LedgerStore, StoreError},
};

#[test]
fn appended_records_survive_a_reload() {
    let (store, path) = sheet_store();
    let mut session = Session::new(Box::new(store));
    assert!(session.ledger().is_empty());
    assert!(matches!(session.notice(), Some(LoadNotice::Unavailable(_))));

    session
        .append(CandidateRecord::complete(
            42.5,
            "Ana",
            "Rui",
            "bus pass",
            date(2024, 5, 6),
            TransactionType::Transfer,
        ))
        .expect("append");
    assert!(path.exists());

    let mut reopened = Session::new(Box::new(JsonSheetStore::new(&path)));
    let ledger = reopened.ledger();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.records()[0].date, Some(date(2024, 5, 6)));
    assert_eq!(ledger.records()[0].amount, 42.5);
    assert_eq!(
        reopened.notice(),
        Some(&LoadNotice::Loaded {
            count: 1,
            quarantined: Vec::new()
        })
    );
}

#[test]
fn foreign_headers_degrade_to_an_empty_ledger() {
    let (store, path) = sheet_store();
    fs::write(&path, r#"[{"Valor": 10, "De": "Ana"}]"#).unwrap();
    let mut session = Session::new(Box::new(store));
    assert!(session.ledger().is_empty());
    match session.notice() {
        Some(LoadNotice::SchemaMismatch { expected, found }) => {
            assert_eq!(expected.len(), 6);
            assert_eq!(found, &vec!["De".to_string(), "Valor".to_string()]);
        }
        other => panic!("unexpected notice: {other:?}"),
    }
}

#[test]
fn bad_rows_are_quarantined_not_fatal() {
    let (store, path) = sheet_store();
    fs::write(
        &path,
        r#"[
            {"amount": 10, "from": "Ana", "to": "Rui", "description": "ok", "date": "2024-01-02", "type": "transfer"},
            {"amount": "ten", "from": "Ana", "to": "Rui", "description": "bad", "date": "2024-01-03", "type": "transfer"}
        ]"#,
    )
    .unwrap();
    let mut session = Session::new(Box::new(store));
    assert_eq!(session.ledger().len(), 1);
    let notice = session.notice().unwrap();
    assert!(notice.is_warning());
    assert!(notice.to_string().contains("row 2"));
}

#[test]
fn corrupt_sheet_is_not_overwritten_by_append() {
    let (store, path) = sheet_store();
    fs::write(&path, "{ not json").unwrap();
    let mut session = Session::new(Box::new(store));

    let err = session
        .append(CandidateRecord::complete(
            1.0,
            "Ana",
            "Rui",
            "snack",
            date(2024, 1, 1),
            TransactionType::Expense,
        ))
        .unwrap_err();
    assert!(matches!(err, LedgerError::AppendFailure(StoreError::Write(_))));
    assert!(session.ledger().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn export_writes_a_timestamped_csv() {
    let (store, _path) = sheet_store();
    let mut session = Session::new(Box::new(store));
    session
        .append(CandidateRecord::complete(
            7.0,
            "Rui",
            "Bakery",
            "bread, rolls",
            date(2024, 2, 29),
            TransactionType::Expense,
        ))
        .unwrap();
    assert_eq!(session.store().load().unwrap().len(), 1);

    let dir = temp_base().join("exports");
    let now = date(2024, 3, 1).and_hms_opt(8, 30, 0).unwrap();
    let file = export_to_dir(session.ledger().records(), &dir, now).unwrap();
    assert!(file.ends_with("transactions_2024-03-01_08-30-00.csv"));

    let csv = fs::read_to_string(file).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("amount,from,to,description,date,type"));
    assert_eq!(lines.next(), Some("7.00,Rui,Bakery,\"bread, rolls\",29-02-2024,expense"));
}
