//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::collections::HashMap;
use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, ShowArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::inputs::ResolveInputs;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Resolution errors a command can explain are reported through `ui` and
    /// turned into a failed [`CommandResult`]; anything else is returned.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
    process_env: HashMap<String, String>,
}

impl CommandDispatcher {
    /// Create a dispatcher for `working_dir` and a snapshot of the process environment.
    pub fn new(working_dir: PathBuf, process_env: HashMap<String, String>) -> Self {
        Self {
            working_dir,
            process_env,
        }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let inputs = ResolveInputs::from_cli(&self.working_dir, cli, self.process_env.clone());

        match &cli.command {
            Some(Commands::Show(args)) => {
                super::show::ShowCommand::new(inputs, args.clone()).execute(ui)
            }
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(inputs, args.clone()).execute(ui)
            }
            Some(Commands::Networks(args)) => {
                super::networks::NetworksCommand::new(inputs, args.clone()).execute(ui)
            }
            Some(Commands::Env(args)) => {
                super::env::EnvCommand::new(inputs, args.clone()).execute(ui)
            }
            Some(Commands::Schema) => super::schema::SchemaCommand::new().execute(ui),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::show::ShowCommand::new(inputs, ShowArgs::default()).execute(ui),
        }
    }
}
