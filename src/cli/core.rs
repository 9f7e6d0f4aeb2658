//! Shell context, command dispatch, and CLI error types.

use std::{io, path::PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{ConfigError, ConfigManager},
    core::services::FilterCriteria,
    errors::{ExportError, LedgerError},
    session::Session,
    storage::JsonSheetStore,
};

use super::{
    commands,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
};

const PROMPT: &str = "family-ledger> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Failures of a single command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: Session,
    pub theme: ColorfulTheme,
    pub export_dir: PathBuf,
    /// Criteria of the last `search`, reused by `export`.
    pub last_view: Option<FilterCriteria>,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context from the user's configuration and sheet location.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_output || mode == CliMode::Script,
        });
        let store = JsonSheetStore::new(manager.sheet_path(&config));
        let session = Session::new(Box::new(store));
        Ok(Self::with_session(mode, session, manager.export_dir(&config)))
    }

    pub fn with_session(mode: CliMode, session: Session, export_dir: PathBuf) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            session,
            theme: ColorfulTheme::default(),
            export_dir,
            last_view: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub fn prompt(&self) -> String {
        PROMPT.to_string()
    }

    /// Loads the ledger up front so the user sees the load outcome immediately.
    pub fn start(&mut self) {
        self.session.ledger();
        self.show_load_notice();
    }

    pub fn show_load_notice(&self) {
        if let Some(notice) = self.session.notice() {
            if notice.is_warning() {
                output::warning(notice);
            } else {
                output::info(notice);
            }
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|entry| entry.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .into_iter()
            .map(|name| (levenshtein(name, &needle), name))
            .min();
        if let Some((distance, name)) = best {
            if distance <= 2 {
                output::info(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }
}
