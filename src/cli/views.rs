//! Table layouts for the ledger views shown by the shell.

use crate::{
    core::services::{BalanceRow, MonthlyPivot, TypeSlice},
    export::EXPORT_DATE_FORMAT,
    ledger::Record,
};

use super::table::{terminal_width, Table, TableColumn};

pub fn money(value: f64) -> String {
    // Avoid printing "-0.00" for cancelled-out sums.
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("{value:.2}")
}

pub fn records_table(records: &[&Record]) -> Table {
    let description_width = terminal_width().saturating_sub(60).max(16);
    let mut table = Table::new(vec![
        TableColumn::right("amount"),
        TableColumn::left("from"),
        TableColumn::left("to"),
        TableColumn::left("description").max_width(description_width),
        TableColumn::left("date"),
        TableColumn::left("type"),
    ]);
    for record in records {
        table.push_row(vec![
            money(record.amount),
            record.from.clone(),
            record.to.clone(),
            record.description.clone(),
            record
                .date
                .map(|date| date.format(EXPORT_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            record.kind.to_string(),
        ]);
    }
    table
}

pub fn pivot_table(pivot: &MonthlyPivot) -> Table {
    let mut columns = vec![TableColumn::left("month")];
    columns.extend(pivot.persons.iter().map(TableColumn::right));
    let mut table = Table::new(columns);
    for row in &pivot.rows {
        let mut cells = vec![row.month.clone()];
        cells.extend(row.values.iter().copied().map(money));
        table.push_row(cells);
    }
    table
}

pub fn balance_table(rows: &[BalanceRow]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("person"),
        TableColumn::right("income"),
        TableColumn::right("expense"),
        TableColumn::right("transferred_in"),
        TableColumn::right("transferred_out"),
        TableColumn::right("total"),
    ]);
    for row in rows {
        table.push_row(vec![
            row.person.clone(),
            money(row.income),
            money(row.expense),
            money(row.transferred_in),
            money(row.transferred_out),
            money(row.total),
        ]);
    }
    table
}

pub fn type_table(slices: &[TypeSlice]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("type"),
        TableColumn::right("amount"),
        TableColumn::right("share"),
        TableColumn::left(""),
    ]);
    for slice in slices {
        let bar_len = (slice.share * 30.0).round() as usize;
        table.push_row(vec![
            slice.kind.to_string(),
            money(slice.amount),
            format!("{:.1}%", slice.share * 100.0),
            "#".repeat(bar_len),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::services::SummaryService,
        ledger::{Ledger, TransactionType},
    };

    #[test]
    fn money_hides_negative_zero() {
        assert_eq!(money(-0.0), "0.00");
        assert_eq!(money(-0.001), "0.00");
        assert_eq!(money(-12.346), "-12.35");
    }

    #[test]
    fn balance_table_lists_every_person() {
        let ledger = Ledger::from_records(vec![Record::new(
            9.0,
            "Ana",
            "Rui",
            "",
            None,
            TransactionType::Transfer,
        )]);
        let rendered = balance_table(&SummaryService::balances(&ledger)).render();
        assert!(rendered.contains("transferred_out"));
        assert!(rendered.lines().any(|line| line.starts_with("Ana") && line.ends_with("-9.00")));
        assert!(rendered.lines().any(|line| line.starts_with("Rui") && line.ends_with("9.00")));
    }
}
