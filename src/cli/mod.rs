//! Command shell over a ledger session.

pub mod commands;
pub mod core;
pub mod forms;
pub mod output;
pub mod registry;
mod shell;
pub mod table;
pub mod views;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
