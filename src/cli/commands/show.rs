//! Show command implementation.
//!
//! The `deployrc show` command prints the resolved configuration.

use crate::cli::args::ShowArgs;
use crate::error::{DeployrcError, Result};
use crate::secrets::OutputMasker;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{resolution_warnings, show_warnings};
use super::inputs::ResolveInputs;

/// The show command implementation.
pub struct ShowCommand {
    inputs: ResolveInputs,
    args: ShowArgs,
}

impl ShowCommand {
    /// Create a new show command.
    pub fn new(inputs: ResolveInputs, args: ShowArgs) -> Self {
        Self { inputs, args }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = self.inputs.resolve(self.args.operation.kind())?;
        let config = &resolution.config;

        show_warnings(ui, &resolution_warnings(config, &resolution.networks));

        let mut document =
            serde_yaml::to_value(config).map_err(|e| DeployrcError::Other(e.into()))?;
        if !self.args.reveal_secrets {
            OutputMasker::for_config(config).mask_value(&mut document);
        }

        let rendered = if self.args.json {
            serde_json::to_string_pretty(&document).map_err(|e| DeployrcError::Other(e.into()))?
        } else {
            serde_yaml::to_string(&document).map_err(|e| DeployrcError::Other(e.into()))?
        };
        ui.message(rendered.trim_end());

        Ok(CommandResult::success())
    }
}
