//! Resolved configuration types.
//!
//! These structs are the output of [`ConfigResolver`](super::ConfigResolver):
//! one [`NetworkProfile`] per deployment target plus the global build and
//! tooling settings consumed by the compile, deploy and test runners.

use crate::operation::OperationKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Publicly documented development seed phrase.
///
/// Used whenever `MNEMONIC` is unset and the operation does not submit
/// anything. Accounts derived from it hold no value on any real network.
pub const PLACEHOLDER_SEED_PHRASE: &str =
    "test test test test test test test test test test test junk";

/// Default BIP-44 derivation path for Ethereum accounts.
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0";

/// Number of accounts derived by default.
pub const DEFAULT_ACCOUNT_COUNT: u32 = 10;

/// Number of accounts the in-process simulation network funds.
pub const SIMULATION_ACCOUNT_COUNT: u32 = 20;

/// Solidity compiler version the pipeline targets.
pub const COMPILER_VERSION: &str = "0.8.6";

/// Root of a resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedConfig {
    /// Operation this configuration was resolved for
    pub operation: OperationKind,

    /// Solidity compiler version
    pub compiler_version: String,

    /// Name of the profile used when none is selected
    pub default_profile: String,

    /// Network profiles keyed by name
    pub profiles: BTreeMap<String, NetworkProfile>,

    /// Source, test, cache and artifact directories
    pub build_paths: BuildPaths,

    /// Logical secret name to value, `None` when unset
    pub secrets: BTreeMap<String, Option<String>>,

    /// Gas usage reporting
    pub gas_reporter: GasReporterSettings,

    /// ABI export after compilation
    pub abi_exporter: AbiExporterSettings,

    /// Documentation generation
    pub docgen: DocgenSettings,

    /// Contract size reporting
    pub contract_sizer: ContractSizerSettings,

    /// File watcher for recompilation
    pub watcher: WatcherSettings,

    /// Named account aliases to derivation index
    pub named_accounts: BTreeMap<String, u32>,

    /// Test runner timeout in milliseconds
    pub test_timeout_ms: u64,
}

impl ResolvedConfig {
    /// Get the default profile.
    pub fn default_network(&self) -> Option<&NetworkProfile> {
        self.profiles.get(&self.default_profile)
    }

    /// Get a profile by name.
    pub fn profile(&self, name: &str) -> Option<&NetworkProfile> {
        self.profiles.get(name)
    }

    /// Profiles carrying the given tag.
    pub fn profiles_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a NetworkProfile> {
        self.profiles.values().filter(move |p| p.has_tag(tag))
    }

    /// Get a secret value if it is set.
    pub fn secret(&self, name: &str) -> Option<&str> {
        self.secrets.get(name).and_then(|v| v.as_deref())
    }

    /// Every secret value contained in this configuration.
    ///
    /// The placeholder seed phrase is public and therefore not included.
    pub fn secret_values(&self) -> Vec<String> {
        let mut values: BTreeSet<String> = self.secrets.values().flatten().cloned().collect();
        for profile in self.profiles.values() {
            if profile.accounts.seed_phrase != PLACEHOLDER_SEED_PHRASE {
                values.insert(profile.accounts.seed_phrase.clone());
            }
            // Archive node URLs usually embed a provider key.
            if let Some(sim) = profile.simulation.as_ref().filter(|s| s.forking.enabled) {
                values.insert(sim.forking.url.clone());
            }
        }
        values.into_iter().filter(|v| !v.is_empty()).collect()
    }
}

/// One deployment target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NetworkProfile {
    /// Profile name, unique within a configuration
    pub name: String,

    /// Chain id, unique within a configuration
    pub chain_id: u64,

    /// RPC endpoint operations are submitted to
    pub endpoint_url: String,

    /// How signing accounts are derived
    pub accounts: AccountDerivation,

    /// Classification tags (production, staging, local, test)
    pub tags: BTreeSet<String>,

    /// Whether this is a real, value-bearing network
    pub live: bool,

    /// Whether deployment records are kept for this profile
    pub save_deployments: bool,

    /// Whether `console.log` calls are stripped before compiling
    pub strip_console_log: bool,

    /// In-process simulation settings (local simulation profile only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationSettings>,
}

impl NetworkProfile {
    /// Check whether the profile carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Local profiles never talk to an external network.
    pub fn is_local(&self) -> bool {
        self.has_tag(super::networks::TAG_LOCAL)
    }
}

/// Deterministic account derivation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AccountDerivation {
    /// Seed phrase accounts are derived from
    pub seed_phrase: String,

    /// Derivation path prefix
    pub derivation_path: String,

    /// Index of the first derived account
    pub first_index: u32,

    /// Number of accounts to derive
    pub count: u32,
}

impl AccountDerivation {
    /// Default derivation from the given seed phrase.
    pub fn from_seed(seed_phrase: impl Into<String>) -> Self {
        Self {
            seed_phrase: seed_phrase.into(),
            derivation_path: DEFAULT_DERIVATION_PATH.to_string(),
            first_index: 0,
            count: DEFAULT_ACCOUNT_COUNT,
        }
    }

    /// Same derivation with a different number of accounts.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Whether the seed phrase is the public development placeholder.
    pub fn uses_placeholder(&self) -> bool {
        self.seed_phrase == PLACEHOLDER_SEED_PHRASE
    }
}

/// Settings for the in-process simulation network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimulationSettings {
    /// EVM hardfork to simulate
    pub hardfork: Hardfork,

    /// Mainnet forking
    pub forking: ForkingSettings,
}

/// EVM hardfork selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Hardfork {
    /// Used for coverage runs, which do not support London yet.
    Berlin,
    London,
}

/// Forking a live chain into the simulation network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForkingSettings {
    /// Whether forking is enabled
    pub enabled: bool,

    /// Endpoint the fork reads state from
    pub url: String,

    /// Block height to fork at, 0 for latest
    pub block_number: u64,
}

/// Build directories. All must be non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BuildPaths {
    /// Contract sources
    pub source_dir: String,

    /// Tests
    pub test_dir: String,

    /// Compiler cache
    pub cache_dir: String,

    /// Compiled artifacts
    pub output_dir: String,
}

impl Default for BuildPaths {
    fn default() -> Self {
        Self {
            source_dir: "./contracts".to_string(),
            test_dir: "./test".to_string(),
            cache_dir: "./cache".to_string(),
            output_dir: "./artifacts".to_string(),
        }
    }
}

impl BuildPaths {
    /// Named entries, for validation and display.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("source_dir", &self.source_dir),
            ("test_dir", &self.test_dir),
            ("cache_dir", &self.cache_dir),
            ("output_dir", &self.output_dir),
        ]
    }
}

/// Gas usage reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GasReporterSettings {
    /// Enabled when `REPORT_GAS` is set
    pub enabled: bool,

    /// Fiat currency for cost estimates
    pub currency: String,

    /// Report destination
    pub output_file: String,
}

/// ABI export after compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AbiExporterSettings {
    pub path: String,
    pub clear: bool,
    pub flat: bool,
    pub spacing: u8,
}

/// Documentation generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocgenSettings {
    pub path: String,
    pub clear: bool,
    pub run_on_compile: bool,
}

/// Contract size reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContractSizerSettings {
    pub alpha_sort: bool,
    pub run_on_compile: bool,
    pub disambiguate_paths: bool,
}

/// File watcher that recompiles on change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WatcherSettings {
    /// Tasks run on change
    pub tasks: Vec<String>,

    /// Watched paths
    pub files: Vec<String>,

    pub verbose: bool,
}
