//! Interactive transaction form.

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::{
    ledger::{CandidateRecord, TransactionType},
    storage::parse_date,
};

use super::core::CommandError;

const OTHER: &str = "Other";

/// Walks the user through every record field.
///
/// Known people are offered in a picker; "Other" asks for a new name.
pub fn prompt_candidate(
    theme: &ColorfulTheme,
    persons: &[String],
    today: NaiveDate,
) -> Result<CandidateRecord, CommandError> {
    let from = pick_person(theme, "From", persons)?;
    let to = pick_person(theme, "To", persons)?;

    let amount: f64 = Input::with_theme(theme)
        .with_prompt("Amount")
        .validate_with(|value: &f64| {
            if value.is_finite() && *value >= 0.0 {
                Ok(())
            } else {
                Err("Amount must be zero or more")
            }
        })
        .interact_text()?;

    let type_names: Vec<&str> = TransactionType::ALL.iter().map(|kind| kind.as_str()).collect();
    let kind_index = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&type_names)
        .default(0)
        .interact()?;

    let description: String = Input::with_theme(theme)
        .with_prompt("Description")
        .interact_text()?;

    let raw_date: String = Input::with_theme(theme)
        .with_prompt("Date")
        .with_initial_text(today.format("%Y-%m-%d").to_string())
        .validate_with(|value: &String| {
            parse_date(value)
                .map(|_| ())
                .ok_or("Use YYYY-MM-DD or DD-MM-YYYY")
        })
        .interact_text()?;

    Ok(CandidateRecord {
        amount: Some(amount),
        from: Some(from),
        to: Some(to),
        description: Some(description),
        date: parse_date(&raw_date),
        kind: TransactionType::ALL.get(kind_index).copied(),
    })
}

fn pick_person(
    theme: &ColorfulTheme,
    label: &str,
    persons: &[String],
) -> Result<String, CommandError> {
    let mut items: Vec<&str> = persons.iter().map(String::as_str).collect();
    items.push(OTHER);
    let choice = Select::with_theme(theme)
        .with_prompt(label)
        .items(&items)
        .default(0)
        .interact()?;
    match persons.get(choice) {
        Some(person) => Ok(person.clone()),
        None => Ok(Input::<String>::with_theme(theme)
            .with_prompt(format!("Enter new '{label}' name"))
            .interact_text()?),
    }
}
