//! Networks command implementation.
//!
//! The `deployrc networks` command lists the resolved network profiles.

use serde::Serialize;

use crate::cli::args::NetworksArgs;
use crate::config::{NetworkProfile, ResolvedConfig};
use crate::error::{DeployrcError, Result};
use crate::secrets::OutputMasker;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::display::{profile_row, resolution_warnings, show_warnings};
use super::inputs::ResolveInputs;

/// One profile as listed by `networks --json`.
#[derive(Debug, Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    chain_id: u64,
    tags: Vec<&'a str>,
    live: bool,
    endpoint_url: String,
}

/// The networks command implementation.
pub struct NetworksCommand {
    inputs: ResolveInputs,
    args: NetworksArgs,
}

impl NetworksCommand {
    /// Create a new networks command.
    pub fn new(inputs: ResolveInputs, args: NetworksArgs) -> Self {
        Self { inputs, args }
    }

    fn selected<'a>(&'a self, config: &'a ResolvedConfig) -> Vec<&'a NetworkProfile> {
        match self.args.tag.as_deref() {
            Some(tag) => config.profiles_tagged(tag).collect(),
            None => config.profiles.values().collect(),
        }
    }
}

impl Command for NetworksCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resolution = self.inputs.resolve(self.args.operation)?;
        let config = &resolution.config;
        let masker = OutputMasker::for_config(config);
        let profiles = self.selected(config);

        if self.args.json {
            let summaries: Vec<_> = profiles
                .iter()
                .map(|p| ProfileSummary {
                    name: &p.name,
                    chain_id: p.chain_id,
                    tags: p.tags.iter().map(String::as_str).collect(),
                    live: p.live,
                    endpoint_url: masker.mask(&p.endpoint_url),
                })
                .collect();
            let json = serde_json::to_string_pretty(&summaries)
                .map_err(|e| DeployrcError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        show_warnings(ui, &resolution_warnings(config, &resolution.networks));
        ui.show_header(&format!("Networks (default: {})", config.default_profile));

        let mut table = Table::new(["Profile", "Chain", "Tags", "Live", "Endpoint"]);
        for profile in profiles {
            table.add_row(profile_row(profile, &masker));
        }
        if table.is_empty() {
            ui.warning(&format!(
                "No profile is tagged '{}'",
                self.args.tag.as_deref().unwrap_or_default()
            ));
        } else {
            ui.message(&table.render());
        }

        Ok(CommandResult::success())
    }
}
