mod common;

use common::{date, household};
use family_ledger::{
    core::services::{net_contribution, FilterCriteria, FilterService, SummaryService, TypeFilter},
    ledger::{Ledger, Record, TransactionType},
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn transfer_and_expense_scenario_nets_out() {
    let ledger = Ledger::from_records(vec![
        Record::new(50.0, "A", "B", "lunch money", Some(date(2024, 3, 1)), TransactionType::Transfer),
        Record::new(100.0, "A", "B", "shared bill", Some(date(2024, 3, 2)), TransactionType::Expense),
        Record::new(100.0, "B", "A", "refund", Some(date(2024, 3, 3)), TransactionType::Income),
    ]);

    let pivot = SummaryService::monthly_pivot(&ledger);
    assert_eq!(pivot.persons, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(pivot.cell("2024-03", "A"), Some(-50.0));
    assert_eq!(pivot.cell("2024-03", "B"), Some(50.0));

    let a = SummaryService::balance_for(&ledger, "A").unwrap();
    assert!(close(a.income, 100.0));
    assert!(close(a.expense, 100.0));
    assert!(close(a.transferred_out, 50.0));
    assert!(close(a.total, -50.0));
    let b = SummaryService::balance_for(&ledger, "B").unwrap();
    assert!(close(b.total, 50.0));
}

#[test]
fn balances_conserve_money_across_people() {
    let ledger = household();
    let total: f64 = SummaryService::balances(&ledger).iter().map(|row| row.total).sum();
    assert!(close(total, 0.0));

    let monthly: f64 = SummaryService::monthly_pivot(&ledger)
        .rows
        .iter()
        .flat_map(|row| row.values.iter())
        .sum();
    assert!(close(monthly, 0.0));
}

#[test]
fn undated_records_only_reach_balances() {
    let ledger = household();
    let pivot = SummaryService::monthly_pivot(&ledger);
    let months: Vec<&str> = pivot.rows.iter().map(|row| row.month.as_str()).collect();
    assert_eq!(months, vec!["2024-01", "2024-02"]);

    // The undated 5.00 transfer still lands in Rui's outgoing transfers.
    let rui = SummaryService::balance_for(&ledger, "Rui").unwrap();
    assert!(close(rui.transferred_out, 5.0));
    assert!(close(rui.total, 50.0 - 20.0 - 5.0));
}

#[test]
fn self_transfer_is_neutral_in_pivot_but_counted_in_balances() {
    let ledger = household();
    let record = &ledger.records()[4];
    assert!(record.is_self_transaction());
    assert_eq!(net_contribution(record, "Ana"), 0.0);

    let ana = SummaryService::balance_for(&ledger, "Ana").unwrap();
    assert!(close(ana.transferred_in, 15.0 + 5.0));
    assert!(close(ana.transferred_out, 50.0 + 15.0));
}

#[test]
fn filters_compose_and_keep_ledger_order() {
    let ledger = household();
    let criteria = FilterCriteria::new()
        .with_kind(TypeFilter::Only(TransactionType::Transfer))
        .with_start(date(2024, 1, 1))
        .with_end(date(2024, 1, 31));
    let selected = FilterService::filter(ledger.records(), &criteria);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].description, "allowance");

    let by_text = FilterService::filter(ledger.records(), &FilterCriteria::new().with_text("ANA"));
    let descriptions: Vec<&str> = by_text.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["salary", "groceries", "allowance", "moved to savings", "returned change"]
    );

    let again = FilterService::filter(by_text.iter().copied(), &FilterCriteria::new().with_text("ANA"));
    assert_eq!(again, by_text);
}

#[test]
fn type_distribution_shares_sum_to_one() {
    let slices = SummaryService::type_distribution(&household());
    let share: f64 = slices.iter().map(|slice| slice.share).sum();
    assert!(close(share, 1.0));
    assert_eq!(slices.len(), 3);
}
