//! Configuration validation rules.
//!
//! This module validates a resolved configuration:
//! - The default profile must exist
//! - Chain ids must be unique across profiles
//! - Build paths must be non-empty
//! - Account derivation must produce at least one account
//!
//! Duplicate profile names are caught earlier, on the input network list,
//! since the resolved profile map cannot represent them.

use crate::config::networks::{KnownNetwork, LOCALHOST, LOCAL_SIMULATION};
use crate::config::schema::ResolvedConfig;
use crate::error::{DeployrcError, Result};
use std::collections::{BTreeMap, HashSet};

/// Rule id for a default profile that does not exist.
pub const RULE_UNKNOWN_DEFAULT: &str = "unknown-default-profile";

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Profile name if error is profile-specific
    pub profile: Option<String>,
}

/// Reject network lists that reuse a name, including the local profile names.
///
/// # Errors
///
/// Returns `DuplicateProfileName` naming the first repeated name.
pub fn check_unique_names(networks: &[KnownNetwork]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::from([LOCAL_SIMULATION, LOCALHOST]);

    for network in networks {
        if !seen.insert(network.name.as_str()) {
            return Err(DeployrcError::DuplicateProfileName {
                name: network.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one.
pub fn validate_config(config: &ResolvedConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !config.profiles.contains_key(&config.default_profile) {
        errors.push(ValidationError {
            rule: RULE_UNKNOWN_DEFAULT.to_string(),
            message: format!(
                "Default profile '{}' is not a known network profile",
                config.default_profile
            ),
            profile: Some(config.default_profile.clone()),
        });
    }

    errors.extend(validate_chain_ids(config));
    errors.extend(validate_accounts(config));
    errors.extend(validate_build_paths(config));

    errors
}

fn validate_chain_ids(config: &ResolvedConfig) -> Vec<ValidationError> {
    let mut owners: BTreeMap<u64, &str> = BTreeMap::new();
    let mut errors = Vec::new();

    for profile in config.profiles.values() {
        if let Some(first) = owners.insert(profile.chain_id, &profile.name) {
            errors.push(ValidationError {
                rule: "duplicate-chain-id".to_string(),
                message: format!(
                    "Profiles '{}' and '{}' share chain id {}",
                    first, profile.name, profile.chain_id
                ),
                profile: Some(profile.name.clone()),
            });
        }
    }

    errors
}

fn validate_accounts(config: &ResolvedConfig) -> Vec<ValidationError> {
    config
        .profiles
        .values()
        .filter(|profile| profile.accounts.count == 0)
        .map(|profile| ValidationError {
            rule: "zero-account-count".to_string(),
            message: format!("Profile '{}' derives zero accounts", profile.name),
            profile: Some(profile.name.clone()),
        })
        .collect()
}

fn validate_build_paths(config: &ResolvedConfig) -> Vec<ValidationError> {
    config
        .build_paths
        .entries()
        .iter()
        .filter(|(_, path)| path.trim().is_empty())
        .map(|(name, _)| ValidationError {
            rule: "empty-build-path".to_string(),
            message: format!("Build path '{}' must not be empty", name),
            profile: None,
        })
        .collect()
}

/// Validate and return Result.
///
/// # Errors
///
/// Returns `UnknownDefaultProfile` when the default profile is missing, and
/// `ConfigValidationError` listing every message for the other rules.
pub fn validate(config: &ResolvedConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.iter().any(|e| e.rule == RULE_UNKNOWN_DEFAULT) {
        return Err(DeployrcError::UnknownDefaultProfile {
            name: config.default_profile.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DeployrcError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
