//! Check command implementation.
//!
//! The `deployrc check` command resolves the configuration for an operation
//! and reports whether it would succeed, without printing it.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{resolution_warnings, show_warnings};
use super::inputs::ResolveInputs;

/// The check command implementation.
pub struct CheckCommand {
    inputs: ResolveInputs,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(inputs: ResolveInputs, args: CheckArgs) -> Self {
        Self { inputs, args }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let operation = self.args.operation.kind();

        let resolution = match self.inputs.resolve(operation) {
            Ok(r) => r,
            Err(e) if e.is_resolution_error() => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(i32::from(e.exit_code())));
            }
            Err(e) => return Err(e),
        };
        let config = &resolution.config;

        show_warnings(ui, &resolution_warnings(config, &resolution.networks));

        if ui.output_mode() == OutputMode::Verbose {
            for (name, profile) in &config.profiles {
                ui.message(&format!("  {} (chain {})", name, profile.chain_id));
            }
        }

        let default = match config.default_network() {
            Some(profile) => format!("{} on chain {}", profile.name, profile.chain_id),
            None => config.default_profile.clone(),
        };
        ui.success(&format!(
            "Configuration valid for {} ({} profiles, default {})",
            operation,
            config.profiles.len(),
            default
        ));

        Ok(CommandResult::success())
    }
}
