//! Env command implementation.
//!
//! The `deployrc env` command shows every environment variable the resolver
//! reads, where its value comes from, and the value itself unless it is a
//! secret.

use serde::Serialize;

use crate::cli::args::EnvArgs;
use crate::config::CONSUMED_VARS;
use crate::error::{DeployrcError, Result};
use crate::secrets::{SecretMatcher, REDACTED};
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::inputs::ResolveInputs;

/// State of one consumed variable.
#[derive(Debug, Serialize)]
struct VarStatus {
    name: &'static str,
    set: bool,
    source: Option<String>,
    value: Option<String>,
    required_for_submit: bool,
}

/// The env command implementation.
pub struct EnvCommand {
    inputs: ResolveInputs,
    args: EnvArgs,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(inputs: ResolveInputs, args: EnvArgs) -> Self {
        Self { inputs, args }
    }

    fn statuses(&self) -> Result<Vec<VarStatus>> {
        let env = self.inputs.load_env()?;
        let matcher = SecretMatcher::with_builtins();

        Ok(CONSUMED_VARS
            .iter()
            .map(|&(name, required_for_submit)| {
                // An empty value counts as unset.
                let value = env.get(name).filter(|v| !v.is_empty());
                VarStatus {
                    name,
                    set: value.is_some(),
                    source: env.source_of(name).map(str::to_string),
                    value: value.map(|v| {
                        if matcher.is_secret(name) {
                            REDACTED.to_string()
                        } else {
                            v.to_string()
                        }
                    }),
                    required_for_submit,
                }
            })
            .collect())
    }
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let statuses = self.statuses()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&statuses)
                .map_err(|e| DeployrcError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Environment ({})", self.inputs.env_file().display()));

        let mut table = Table::new(["Variable", "Status", "Source", "Value", "Submit"]);
        for status in &statuses {
            table.add_row([
                status.name.to_string(),
                if status.set { "set" } else { "unset" }.to_string(),
                status.source.clone().unwrap_or_else(|| "-".to_string()),
                status.value.clone().unwrap_or_else(|| "-".to_string()),
                if status.required_for_submit {
                    "required"
                } else {
                    "optional"
                }
                .to_string(),
            ]);
        }
        ui.message(&table.render());

        let missing: Vec<_> = statuses
            .iter()
            .filter(|s| s.required_for_submit && !s.set)
            .map(|s| s.name)
            .collect();
        if !missing.is_empty() {
            ui.warning(&format!("Submitting needs {}", missing.join(", ")));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn command(temp: &TempDir, process: &[(&str, &str)], json: bool) -> EnvCommand {
        let process: HashMap<String, String> = process
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvCommand::new(ResolveInputs::new(temp.path(), process), EnvArgs { json })
    }

    #[test]
    fn lists_every_consumed_variable() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, &[], false);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        for (name, _) in CONSUMED_VARS {
            assert!(ui.has_message(name), "missing {}", name);
        }
        assert!(ui.has_warning("MNEMONIC, INFURA_API_KEY"));
    }

    #[test]
    fn secrets_are_redacted_and_sources_named() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".env"),
            "MNEMONIC=hidden words\nFORKING_BLOCK=13000000\n",
        )
        .unwrap();
        let cmd = command(&temp, &[("INFURA_API_KEY", "abc123")], true);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let output = ui.output();
        assert!(!output.contains("hidden words"));
        assert!(!output.contains("abc123"));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let vars = value.as_array().unwrap();
        let find = |name: &str| vars.iter().find(|v| v["name"] == name).unwrap().clone();

        let mnemonic = find("MNEMONIC");
        assert_eq!(mnemonic["set"], true);
        assert_eq!(mnemonic["value"], REDACTED);
        assert!(mnemonic["source"].as_str().unwrap().ends_with(".env"));

        let key = find("INFURA_API_KEY");
        assert_eq!(key["source"], "process");

        let block = find("FORKING_BLOCK");
        assert_eq!(block["value"], "13000000");
        assert_eq!(block["required_for_submit"], false);

        assert_eq!(find("REPORT_GAS")["set"], false);
    }

    #[test]
    fn empty_value_is_unset() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp, &[("MNEMONIC", "")], true);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.output()).unwrap();
        let mnemonic = &value.as_array().unwrap()[0];
        assert_eq!(mnemonic["name"], "MNEMONIC");
        assert_eq!(mnemonic["set"], false);
        assert_eq!(mnemonic["source"], "process");
    }

    #[test]
    fn no_warning_when_submit_ready() {
        let temp = TempDir::new().unwrap();
        let cmd = command(
            &temp,
            &[("MNEMONIC", "some words"), ("INFURA_API_KEY", "abc123")],
            false,
        );
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.warnings().is_empty());
    }
}
