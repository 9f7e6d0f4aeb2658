//! Per-person and per-month aggregations over the ledger.

use std::collections::BTreeMap;

use tracing::debug;

use crate::ledger::{Ledger, Record, TransactionType};

/// Signed effect of `record` on `person` for the monthly view.
///
/// All three types share one rule: the receiving side gains the amount and
/// the sending side loses it. An expense paid to someone therefore counts as
/// value received by them. Self-transactions and uninvolved persons net 0.
pub fn net_contribution(record: &Record, person: &str) -> f64 {
    match (record.to == person, record.from == person) {
        (true, false) => record.amount,
        (false, true) => -record.amount,
        _ => 0.0,
    }
}

/// Month-by-person table of summed net contributions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyPivot {
    pub persons: Vec<String>,
    pub rows: Vec<MonthRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    /// `YYYY-MM`
    pub month: String,
    /// One value per entry of [`MonthlyPivot::persons`].
    pub values: Vec<f64>,
}

impl MonthlyPivot {
    pub fn cell(&self, month: &str, person: &str) -> Option<f64> {
        let column = self.persons.iter().position(|p| p == person)?;
        self.rows
            .iter()
            .find(|row| row.month == month)
            .and_then(|row| row.values.get(column).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All-time gross and net figures for one person.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceRow {
    pub person: String,
    pub income: f64,
    pub expense: f64,
    pub transferred_in: f64,
    pub transferred_out: f64,
    pub total: f64,
}

/// Share of the summed amounts carried by one transaction type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSlice {
    pub kind: TransactionType,
    pub amount: f64,
    pub share: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Groups dated records by month and pivots net contributions by person.
    ///
    /// Columns cover the full person set; cells with no activity are `0`.
    pub fn monthly_pivot(ledger: &Ledger) -> MonthlyPivot {
        let persons: Vec<String> = ledger.persons().iter().cloned().collect();
        let mut months: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for record in ledger.records() {
            let Some(month) = record.month_key() else {
                continue;
            };
            let values = months
                .entry(month)
                .or_insert_with(|| vec![0.0; persons.len()]);
            for (idx, person) in persons.iter().enumerate() {
                if record.involves(person) {
                    values[idx] += net_contribution(record, person);
                }
            }
        }

        debug!(months = months.len(), persons = persons.len(), "built monthly pivot");
        MonthlyPivot {
            persons,
            rows: months
                .into_iter()
                .map(|(month, values)| MonthRow { month, values })
                .collect(),
        }
    }

    /// Gross income/expense/transfer totals per person, sorted by name.
    ///
    /// Unlike the monthly pivot, self-transactions are counted on both
    /// sides: they show up in the gross columns and cancel in `total`.
    pub fn balances(ledger: &Ledger) -> Vec<BalanceRow> {
        let mut rows: BTreeMap<&str, BalanceRow> = ledger
            .persons()
            .iter()
            .map(|person| {
                (
                    person.as_str(),
                    BalanceRow {
                        person: person.clone(),
                        ..BalanceRow::default()
                    },
                )
            })
            .collect();

        for record in ledger.records() {
            let amount = record.amount;
            match record.kind {
                TransactionType::Income | TransactionType::Expense => {
                    if let Some(row) = rows.get_mut(record.to.as_str()) {
                        row.income += amount;
                    }
                    if let Some(row) = rows.get_mut(record.from.as_str()) {
                        row.expense += amount;
                    }
                }
                TransactionType::Transfer => {
                    if let Some(row) = rows.get_mut(record.to.as_str()) {
                        row.transferred_in += amount;
                    }
                    if let Some(row) = rows.get_mut(record.from.as_str()) {
                        row.transferred_out += amount;
                    }
                }
            }
        }

        rows.into_values()
            .map(|mut row| {
                row.total = (row.income + row.transferred_in) - (row.expense + row.transferred_out);
                row
            })
            .collect()
    }

    /// Balance of a single person, `None` when they never appear.
    pub fn balance_for(ledger: &Ledger, person: &str) -> Option<BalanceRow> {
        if !ledger.persons().contains(person) {
            return None;
        }
        Self::balances(ledger)
            .into_iter()
            .find(|row| row.person == person)
    }

    /// Summed amount per type; zero-sum types are left out.
    pub fn type_distribution(ledger: &Ledger) -> Vec<TypeSlice> {
        let mut sums: BTreeMap<TransactionType, f64> = BTreeMap::new();
        for record in ledger.records() {
            *sums.entry(record.kind).or_insert(0.0) += record.amount;
        }
        let grand_total: f64 = sums.values().sum();
        sums.into_iter()
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(kind, amount)| TypeSlice {
                kind,
                amount,
                share: amount / grand_total,
            })
            .collect()
    }
}
