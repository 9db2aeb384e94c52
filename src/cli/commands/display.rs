//! Shared display helpers for resolved configurations.
//!
//! These helpers are used by `show`, `check` and `networks` to report
//! the same advisories and render profiles consistently.

use std::collections::BTreeSet;

use crate::config::networks::ENDPOINT_API_KEY_VAR;
use crate::config::resolver::MNEMONIC_VAR;
use crate::config::{KnownNetwork, NetworkProfile, ResolvedConfig};
use crate::operation::OperationKind;
use crate::secrets::OutputMasker;
use crate::ui::UserInterface;

/// Non-fatal problems with a configuration resolved for a non-local operation.
pub fn resolution_warnings(config: &ResolvedConfig, networks: &[KnownNetwork]) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.operation == OperationKind::LocalOnly {
        return warnings;
    }

    if config
        .profiles
        .values()
        .any(|p| !p.is_local() && p.accounts.uses_placeholder())
    {
        warnings.push(format!(
            "{} not set; remote profiles use the public placeholder seed phrase",
            MNEMONIC_VAR
        ));
    }

    if config.secret("endpoint_api_key").is_none() && networks.iter().any(|n| n.requires_api_key())
    {
        warnings.push(format!(
            "{} not set; remote endpoint URLs are missing their API key",
            ENDPOINT_API_KEY_VAR
        ));
    }

    warnings
}

/// Print each advisory through the warning channel.
pub fn show_warnings(ui: &mut dyn UserInterface, warnings: &[String]) {
    for warning in warnings {
        ui.warning(warning);
    }
}

/// Comma-separated tag list.
pub fn format_tags(tags: &BTreeSet<String>) -> String {
    tags.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// "yes" or "no".
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Table cells for one profile, with secrets in the endpoint masked.
pub fn profile_row(profile: &NetworkProfile, masker: &OutputMasker) -> [String; 5] {
    [
        profile.name.clone(),
        profile.chain_id.to_string(),
        format_tags(&profile.tags),
        yes_no(profile.live).to_string(),
        masker.mask(&profile.endpoint_url),
    ]
}
