//! CSV export of a record selection.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use tracing::info;

use crate::{errors::ExportError, ledger::Record, storage::expected_columns, utils::persistence};

pub const EXPORT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Writes `records` as CSV with one column per record field.
pub fn export_csv<'a, W, I>(records: I, writer: W) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(expected_columns())?;

    let mut written = 0;
    for record in records {
        let date = record
            .date
            .map(|date| date.format(EXPORT_DATE_FORMAT).to_string())
            .unwrap_or_default();
        csv_writer.write_record([
            format!("{:.2}", record.amount).as_str(),
            record.from.as_str(),
            record.to.as_str(),
            record.description.as_str(),
            date.as_str(),
            record.kind.as_str(),
        ])?;
        written += 1;
    }
    csv_writer.flush()?;
    Ok(written)
}

/// File name for an export taken at `now`.
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("transactions_{}.csv", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Writes an export into `dir` and returns the created file path.
pub fn export_to_dir<'a, I>(records: I, dir: &Path, now: NaiveDateTime) -> Result<PathBuf, ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    persistence::ensure_dir(dir)?;
    let path = dir.join(export_file_name(now));
    let file = File::create(&path)?;
    let written = export_csv(records, file)?;
    info!(path = %path.display(), written, "exported transactions");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionType;
    use chrono::NaiveDate;

    #[test]
    fn csv_uses_day_first_dates_and_two_decimals() {
        let records = vec![
            Record::new(
                12.5,
                "Ana",
                "Rui",
                "tea, biscuits",
                NaiveDate::from_ymd_opt(2024, 3, 7),
                TransactionType::Expense,
            ),
            Record::new(3.0, "Rui", "Ana", "", None, TransactionType::Transfer),
        ];
        let mut buffer = Vec::new();
        let written = export_csv(&records, &mut buffer).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "amount,from,to,description,date,type");
        assert_eq!(lines[1], "12.50,Ana,Rui,\"tea, biscuits\",07-03-2024,expense");
        assert_eq!(lines[2], "3.00,Rui,Ana,,,transfer");
    }

    #[test]
    fn file_name_embeds_timestamp() {
        let now = NaiveDate::from_ymd_opt(2024, 11, 2)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap();
        assert_eq!(export_file_name(now), "transactions_2024-11-02_09-05-30.csv");
    }
}
