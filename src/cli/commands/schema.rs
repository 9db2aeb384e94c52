//! Schema command implementation.
//!
//! The `deployrc schema` command prints the JSON Schema of the resolved
//! configuration, for consumers that validate `show --json` output.

use crate::config::ResolvedConfig;
use crate::error::{DeployrcError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = schemars::schema_for!(ResolvedConfig);
        let json =
            serde_json::to_string_pretty(&schema).map_err(|e| DeployrcError::Other(e.into()))?;
        ui.message(&json);
        Ok(CommandResult::success())
    }
}
