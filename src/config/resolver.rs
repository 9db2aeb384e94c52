//! Network configuration resolution.
//!
//! [`ConfigResolver::resolve`] turns an environment mapping, an operation
//! kind and a list of known networks into a validated [`ResolvedConfig`].
//! It reads nothing but its arguments, so the same inputs always produce an
//! equal configuration.

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::config::networks::{
    KnownNetwork, ENDPOINT_API_KEY_VAR, FORKING_URL_PLACEHOLDER, LOCALHOST, LOCALHOST_CHAIN_ID,
    LOCALHOST_URL, LOCAL_SIMULATION, LOCAL_SIMULATION_CHAIN_ID, MAINNET, TAG_LOCAL,
    TAG_PRODUCTION, TAG_STAGING, TAG_TEST,
};
use crate::config::schema::{
    AbiExporterSettings, AccountDerivation, BuildPaths, ContractSizerSettings, DocgenSettings,
    ForkingSettings, GasReporterSettings, Hardfork, NetworkProfile, ResolvedConfig,
    SimulationSettings, WatcherSettings, COMPILER_VERSION, PLACEHOLDER_SEED_PHRASE,
    SIMULATION_ACCOUNT_COUNT,
};
use crate::config::validator::{check_unique_names, validate};
use crate::error::{DeployrcError, Result};
use crate::operation::OperationKind;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Seed phrase for account derivation.
pub const MNEMONIC_VAR: &str = "MNEMONIC";
/// Block explorer verification key.
pub const VERIFICATION_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";
/// Alternate endpoint the simulation network forks from.
pub const FORKING_URL_VAR: &str = "FORKING_URL";
/// Block height the simulation network forks at.
pub const FORKING_BLOCK_VAR: &str = "FORKING_BLOCK";
/// Set during coverage runs.
pub const CODE_COVERAGE_VAR: &str = "CODE_COVERAGE";
/// Enables gas reporting.
pub const REPORT_GAS_VAR: &str = "REPORT_GAS";
/// Price lookup key for gas reporting.
pub const PRICING_API_KEY_VAR: &str = "COINMARKETCAP_API_KEY";

/// Every environment variable the resolver reads, with whether submission requires it.
pub const CONSUMED_VARS: &[(&str, bool)] = &[
    (MNEMONIC_VAR, true),
    (ENDPOINT_API_KEY_VAR, true),
    (VERIFICATION_API_KEY_VAR, false),
    (FORKING_URL_VAR, false),
    (FORKING_BLOCK_VAR, false),
    (CODE_COVERAGE_VAR, false),
    (REPORT_GAS_VAR, false),
    (PRICING_API_KEY_VAR, false),
];

/// Logical secret names and the variables they are read from.
pub const SECRET_VARS: &[(&str, &str)] = &[
    ("endpoint_api_key", ENDPOINT_API_KEY_VAR),
    ("verification_api_key", VERIFICATION_API_KEY_VAR),
    ("pricing_api_key", PRICING_API_KEY_VAR),
];

/// Resolves network profiles and build settings from an environment.
///
/// # Example
///
/// ```
/// use deployrc::config::{ConfigResolver, KnownNetwork};
/// use deployrc::OperationKind;
/// use std::collections::HashMap;
///
/// let env = HashMap::from([
///     ("MNEMONIC".to_string(), "candy maple cake sugar pudding cream honey rich smooth crumble sweet treat".to_string()),
///     ("INFURA_API_KEY".to_string(), "abc123".to_string()),
/// ]);
///
/// let config = ConfigResolver::new()
///     .resolve(&env, OperationKind::Submit, &KnownNetwork::defaults())
///     .unwrap();
///
/// let goerli = config.profile("goerli").unwrap();
/// assert_eq!(goerli.endpoint_url, "https://goerli.infura.io/v3/abc123");
/// assert!(config.profile("mainnet").unwrap().live);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    default_profile: String,
    mainnet_name: String,
    build_paths: BuildPaths,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Create a resolver with the standard defaults.
    pub fn new() -> Self {
        Self {
            default_profile: LOCAL_SIMULATION.to_string(),
            mainnet_name: MAINNET.to_string(),
            build_paths: BuildPaths::default(),
        }
    }

    /// Set the profile used when none is selected.
    pub fn with_default_profile(mut self, name: impl Into<String>) -> Self {
        self.default_profile = name.into();
        self
    }

    /// Set which network is tagged as production and marked live.
    pub fn with_mainnet_name(mut self, name: impl Into<String>) -> Self {
        self.mainnet_name = name.into();
        self
    }

    /// Override the build directories.
    pub fn with_build_paths(mut self, paths: BuildPaths) -> Self {
        self.build_paths = paths;
        self
    }

    /// Resolve a configuration.
    ///
    /// # Errors
    ///
    /// - `DuplicateProfileName` if `known_networks` repeats a name or reuses a
    ///   local profile name, for any operation kind
    /// - `MissingSecret` if `operation` is `Submit` and `MNEMONIC` is unset, or
    ///   `INFURA_API_KEY` is unset while a network template needs it
    /// - `UnknownDefaultProfile` if the default profile is not resolved
    /// - `ConfigValidationError` if another invariant fails
    pub fn resolve(
        &self,
        env: &HashMap<String, String>,
        operation: OperationKind,
        known_networks: &[KnownNetwork],
    ) -> Result<ResolvedConfig> {
        check_unique_names(known_networks)?;

        let seed_phrase = self.seed_phrase(env, operation)?;
        if operation.requires_secrets()
            && lookup(env, ENDPOINT_API_KEY_VAR).is_none()
            && known_networks.iter().any(KnownNetwork::requires_api_key)
        {
            return Err(DeployrcError::MissingSecret {
                name: ENDPOINT_API_KEY_VAR.to_string(),
            });
        }

        let mut profiles = BTreeMap::new();
        for profile in [
            self.simulation_profile(env, &seed_phrase),
            self.localhost_profile(&seed_phrase),
        ] {
            profiles.insert(profile.name.clone(), profile);
        }
        for network in known_networks {
            let profile = self.remote_profile(env, network, &seed_phrase);
            profiles.insert(profile.name.clone(), profile);
        }

        let secrets = SECRET_VARS
            .iter()
            .map(|(name, var)| (name.to_string(), lookup(env, var).map(str::to_string)))
            .collect();

        let config = ResolvedConfig {
            operation,
            compiler_version: COMPILER_VERSION.to_string(),
            default_profile: self.default_profile.clone(),
            profiles,
            build_paths: self.build_paths.clone(),
            secrets,
            gas_reporter: GasReporterSettings {
                enabled: lookup(env, REPORT_GAS_VAR).is_some(),
                currency: "EUR".to_string(),
                output_file: "gas-report.txt".to_string(),
            },
            abi_exporter: AbiExporterSettings {
                path: "./abi".to_string(),
                clear: true,
                flat: true,
                spacing: 2,
            },
            docgen: DocgenSettings {
                path: "./docs".to_string(),
                clear: true,
                run_on_compile: false,
            },
            contract_sizer: ContractSizerSettings {
                alpha_sort: true,
                run_on_compile: false,
                disambiguate_paths: false,
            },
            watcher: WatcherSettings {
                tasks: vec!["compile".to_string()],
                files: vec![self.build_paths.source_dir.clone()],
                verbose: true,
            },
            named_accounts: BTreeMap::from([("deployer".to_string(), 0)]),
            test_timeout_ms: 60_000,
        };

        validate(&config)?;

        tracing::debug!(
            "Resolved {} profiles for {} (default: {})",
            config.profiles.len(),
            operation,
            config.default_profile
        );

        Ok(config)
    }

    fn seed_phrase(&self, env: &HashMap<String, String>, operation: OperationKind) -> Result<String> {
        match lookup(env, MNEMONIC_VAR) {
            Some(phrase) => Ok(phrase.to_string()),
            None if operation.requires_secrets() => Err(DeployrcError::MissingSecret {
                name: MNEMONIC_VAR.to_string(),
            }),
            None => {
                tracing::debug!("{} unset, using the placeholder seed phrase", MNEMONIC_VAR);
                Ok(PLACEHOLDER_SEED_PHRASE.to_string())
            }
        }
    }

    fn remote_profile(
        &self,
        env: &HashMap<String, String>,
        network: &KnownNetwork,
        seed_phrase: &str,
    ) -> NetworkProfile {
        let ctx = InterpolationContext::new()
            .with_network(&network.name)
            .with_env(env);
        let is_mainnet = network.name == self.mainnet_name;
        let tag = if is_mainnet {
            TAG_PRODUCTION
        } else {
            TAG_STAGING
        };

        NetworkProfile {
            name: network.name.clone(),
            chain_id: network.chain_id,
            endpoint_url: resolve_string(&network.url_template, &ctx),
            accounts: AccountDerivation::from_seed(seed_phrase),
            tags: tags(&[tag]),
            live: is_mainnet,
            save_deployments: true,
            strip_console_log: true,
            simulation: None,
        }
    }

    fn simulation_profile(&self, env: &HashMap<String, String>, seed_phrase: &str) -> NetworkProfile {
        let forking_url = lookup(env, FORKING_URL_VAR);
        let hardfork = if lookup(env, CODE_COVERAGE_VAR).is_some() {
            Hardfork::Berlin
        } else {
            Hardfork::London
        };

        NetworkProfile {
            name: LOCAL_SIMULATION.to_string(),
            chain_id: LOCAL_SIMULATION_CHAIN_ID,
            endpoint_url: String::new(),
            accounts: AccountDerivation::from_seed(seed_phrase)
                .with_count(SIMULATION_ACCOUNT_COUNT),
            tags: tags(&[TAG_TEST, TAG_LOCAL]),
            live: false,
            save_deployments: false,
            strip_console_log: false,
            simulation: Some(SimulationSettings {
                hardfork,
                forking: ForkingSettings {
                    enabled: forking_url.is_some(),
                    url: forking_url.unwrap_or(FORKING_URL_PLACEHOLDER).to_string(),
                    block_number: forking_block(env),
                },
            }),
        }
    }

    fn localhost_profile(&self, seed_phrase: &str) -> NetworkProfile {
        NetworkProfile {
            name: LOCALHOST.to_string(),
            chain_id: LOCALHOST_CHAIN_ID,
            endpoint_url: LOCALHOST_URL.to_string(),
            accounts: AccountDerivation::from_seed(seed_phrase),
            tags: tags(&[TAG_LOCAL]),
            live: false,
            save_deployments: false,
            strip_console_log: false,
            simulation: None,
        }
    }
}

/// Resolve with the default resolver settings.
pub fn resolve(
    env: &HashMap<String, String>,
    operation: OperationKind,
    known_networks: &[KnownNetwork],
) -> Result<ResolvedConfig> {
    ConfigResolver::new().resolve(env, operation, known_networks)
}

/// Look up a variable, treating empty values as unset.
pub fn lookup<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Parse `FORKING_BLOCK` from its leading digits, falling back to 0 (latest).
fn forking_block(env: &HashMap<String, String>) -> u64 {
    let Some(raw) = lookup(env, FORKING_BLOCK_VAR) else {
        return 0;
    };

    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse() {
        Ok(block) => block,
        Err(_) => {
            tracing::warn!(
                "Ignoring {}={:?}: not a block number, forking from latest",
                FORKING_BLOCK_VAR,
                raw
            );
            0
        }
    }
}

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|t| t.to_string()).collect()
}
