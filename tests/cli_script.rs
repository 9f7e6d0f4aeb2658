mod common;

use assert_cmd::Command;
use predicates::str::contains;

fn script_command(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("family_ledger_cli").unwrap();
    cmd.env("FAMILY_LEDGER_CLI_SCRIPT", "1")
        .env("FAMILY_LEDGER_HOME", home)
        .env("FAMILY_LEDGER_SHEET", home.join("sheet.json"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_adds_and_summarizes() {
    let home = common::temp_base();
    let input = "add Ana Rui 100 income 2024-01-05 birthday gift\nbalance\nmonthly\nexit\n";

    script_command(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Transaction added"))
        .stdout(contains("Balance by Person"))
        .stdout(contains("2024-01"));

    let json = std::fs::read_to_string(home.join("sheet.json")).unwrap();
    assert!(json.contains("\"birthday gift\""));
}

#[test]
fn script_mode_reports_bad_commands_and_keeps_going() {
    let home = common::temp_base();
    script_command(&home)
        .write_stdin("balanse\nadd Ana Rui lots\npeople\nexit\n")
        .assert()
        .success()
        .stdout(contains("Did you mean `balance`?"))
        .stdout(contains("Nobody appears in the ledger yet."));
}
