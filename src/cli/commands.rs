//! Command handlers for the ledger shell.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::{
    core::services::{FilterCriteria, FilterService, SummaryService, TypeFilter},
    export,
    ledger::{CandidateRecord, Record, TransactionType},
    storage::parse_date,
    utils::build_info,
};

use super::{
    core::{CliMode, CommandError, CommandResult, ShellContext},
    forms, output,
    registry::{CommandEntry, CommandRegistry},
    views,
};

pub fn register_all(registry: &mut CommandRegistry) {
    let entries = [
        CommandEntry {
            name: "add",
            aliases: &[],
            description: "Record a new transaction",
            usage: "add <from> <to> <amount> <income|expense|transfer> <date|today> <description...>",
            handler: cmd_add,
        },
        CommandEntry {
            name: "search",
            aliases: &["list"],
            description: "Show transactions matching text, type and date filters",
            usage: "search [TEXT] [--text TEXT] [--type All|income|expense|transfer] [--from DATE] [--to DATE]",
            handler: cmd_search,
        },
        CommandEntry {
            name: "export",
            aliases: &[],
            description: "Write the last search result to a CSV file",
            usage: "export [DIR]",
            handler: cmd_export,
        },
        CommandEntry {
            name: "monthly",
            aliases: &[],
            description: "Monthly net contribution per person",
            usage: "monthly",
            handler: cmd_monthly,
        },
        CommandEntry {
            name: "balance",
            aliases: &[],
            description: "All-time balance per person",
            usage: "balance [PERSON]",
            handler: cmd_balance,
        },
        CommandEntry {
            name: "types",
            aliases: &[],
            description: "Amount distribution by transaction type",
            usage: "types",
            handler: cmd_types,
        },
        CommandEntry {
            name: "people",
            aliases: &[],
            description: "List everyone who appears in the ledger",
            usage: "people",
            handler: cmd_people,
        },
        CommandEntry {
            name: "reload",
            aliases: &[],
            description: "Reload the ledger from the sheet",
            usage: "reload",
            handler: cmd_reload,
        },
        CommandEntry {
            name: "status",
            aliases: &[],
            description: "Show the sheet location and ledger size",
            usage: "status",
            handler: cmd_status,
        },
        CommandEntry {
            name: "version",
            aliases: &[],
            description: "Show build information",
            usage: "version",
            handler: cmd_version,
        },
        CommandEntry {
            name: "help",
            aliases: &["?"],
            description: "List commands or show usage for one",
            usage: "help [COMMAND]",
            handler: cmd_help,
        },
        CommandEntry {
            name: "exit",
            aliases: &["quit"],
            description: "Leave the shell",
            usage: "exit",
            handler: cmd_exit,
        },
    ];
    for entry in entries {
        registry.register(entry);
    }
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = Local::now().date_naive();
    let candidate = if args.is_empty() && context.mode == CliMode::Interactive {
        let persons: Vec<String> = context.session.ledger().persons().iter().cloned().collect();
        forms::prompt_candidate(&context.theme, &persons, today)?
    } else {
        parse_add_args(args, today)?
    };
    let record = context.session.append(candidate)?;
    output::success(format!("Transaction added: {}", describe(&record)));
    Ok(())
}

fn describe(record: &Record) -> String {
    let date = record
        .date
        .map(|date| date.format(export::EXPORT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "no date".into());
    format!(
        "{} {} from {} to {} on {} ({})",
        views::money(record.amount),
        record.kind,
        record.from,
        record.to,
        date,
        record.description
    )
}

/// Parses positional `add` arguments. Missing trailing positions are left
/// empty so validation can name the first missing field.
pub fn parse_add_args(args: &[&str], today: NaiveDate) -> Result<CandidateRecord, CommandError> {
    let amount = args
        .get(2)
        .map(|raw| {
            raw.parse::<f64>()
                .map_err(|_| CommandError::InvalidArguments(format!("Invalid amount `{raw}`.")))
        })
        .transpose()?;
    let kind = args
        .get(3)
        .map(|raw| {
            raw.parse::<TransactionType>()
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))
        })
        .transpose()?;
    let date = args.get(4).map(|raw| parse_date_arg(raw, today)).transpose()?;
    let description = (args.len() > 5).then(|| args[5..].join(" "));

    Ok(CandidateRecord {
        amount,
        from: args.first().map(|s| s.to_string()),
        to: args.get(1).map(|s| s.to_string()),
        description,
        date,
        kind,
    })
}

fn parse_date_arg(raw: &str, today: NaiveDate) -> Result<NaiveDate, CommandError> {
    if raw.eq_ignore_ascii_case("today") {
        return Ok(today);
    }
    parse_date(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "Invalid date `{raw}`. Use YYYY-MM-DD or DD-MM-YYYY."
        ))
    })
}

/// Parses `search` flags into filter criteria.
pub fn parse_filter_args(args: &[&str]) -> Result<FilterCriteria, CommandError> {
    let today = Local::now().date_naive();
    let mut criteria = FilterCriteria::new();
    let mut words = Vec::new();
    let mut iter = args.iter();

    while let Some(&arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next().copied().ok_or_else(|| {
                CommandError::InvalidArguments(format!("Flag `{flag}` needs a value."))
            })
        };
        match arg {
            "--text" | "-t" => criteria.text = Some(value(arg)?.to_string()),
            "--type" | "-k" => {
                let raw = value(arg)?;
                criteria.kind = raw
                    .parse::<TypeFilter>()
                    .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            }
            "--from" | "--start" => criteria.start = Some(parse_date_arg(value(arg)?, today)?),
            "--to" | "--end" => criteria.end = Some(parse_date_arg(value(arg)?, today)?),
            flag if flag.starts_with("--") => {
                return Err(CommandError::InvalidArguments(format!("Unknown flag `{flag}`.")));
            }
            word => words.push(word),
        }
    }

    if !words.is_empty() {
        if criteria.text.is_some() {
            return Err(CommandError::InvalidArguments(
                "Give the search text either as words or with --text, not both.".into(),
            ));
        }
        criteria.text = Some(words.join(" "));
    }
    Ok(criteria)
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let criteria = parse_filter_args(args)?;
    let ledger = context.session.ledger();
    let selected = FilterService::filter(ledger.records(), &criteria);

    output::section("Filtered Transactions");
    if selected.is_empty() {
        output::info("No transactions match.");
    } else {
        println!("{}", views::records_table(&selected).render());
    }
    output::info(format!(
        "{} of {} transaction(s) shown.",
        selected.len(),
        ledger.len()
    ));
    context.last_view = Some(criteria);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 1 {
        return Err(CommandError::InvalidArguments("Usage: export [DIR]".into()));
    }
    let dir = args
        .first()
        .map(|dir| PathBuf::from(*dir))
        .unwrap_or_else(|| context.export_dir.clone());
    let criteria = context.last_view.clone().unwrap_or_default();
    let ledger = context.session.ledger();
    let selected = FilterService::filter(ledger.records(), &criteria);
    if selected.is_empty() {
        output::warning("Nothing to export.");
        return Ok(());
    }
    let path = export::export_to_dir(selected.iter().copied(), &dir, Local::now().naive_local())?;
    output::success(format!(
        "Exported {} transaction(s) to {}",
        selected.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_monthly(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let pivot = SummaryService::monthly_pivot(context.session.ledger());
    output::section("Monthly Summary by Person");
    if pivot.is_empty() {
        output::info("No dated transactions yet.");
    } else {
        println!("{}", views::pivot_table(&pivot).render());
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let ledger = context.session.ledger();
    let rows = match args {
        [] => SummaryService::balances(ledger),
        [person] => match SummaryService::balance_for(ledger, person) {
            Some(row) => vec![row],
            None => {
                output::warning(format!("`{person}` does not appear in the ledger."));
                return Ok(());
            }
        },
        _ => return Err(CommandError::InvalidArguments("Usage: balance [PERSON]".into())),
    };
    output::section("Balance by Person");
    if rows.is_empty() {
        output::info("No transactions yet.");
    } else {
        println!("{}", views::balance_table(&rows).render());
    }
    Ok(())
}

fn cmd_types(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let slices = SummaryService::type_distribution(context.session.ledger());
    output::section("Transaction Type Distribution");
    if slices.is_empty() {
        output::info("No amounts recorded yet.");
    } else {
        println!("{}", views::type_table(&slices).render());
    }
    Ok(())
}

fn cmd_people(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let persons = context.session.ledger().persons();
    if persons.is_empty() {
        output::info("Nobody appears in the ledger yet.");
        return Ok(());
    }
    output::section("People");
    for person in persons {
        println!("{person}");
    }
    Ok(())
}

fn cmd_reload(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.reload();
    context.last_view = None;
    context.show_load_notice();
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let location = context.session.store().describe();
    let ledger = context.session.ledger();
    let (records, persons) = (ledger.len(), ledger.persons().len());
    output::section("Status");
    println!("Sheet:        {location}");
    println!("Transactions: {records}");
    println!("People:       {persons}");
    println!("Export dir:   {}", context.export_dir.display());
    context.show_load_notice();
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let build = build_info::current();
    output::info(build.summary());
    output::info(format!("rustc: {}", build.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let Some(entry) = context.registry.get(&name.to_lowercase()) else {
            return Err(CommandError::InvalidArguments(format!("Unknown command `{name}`.")));
        };
        output::info(entry.description);
        println!("Usage: {}", entry.usage);
        return Ok(());
    }
    output::section("Commands");
    for entry in context.registry.list() {
        println!("{:<10} {}", entry.name, entry.description);
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
