//! Integration tests for the resolver's public API.

use deployrc::config::{
    load_environment, load_networks_file, resolve, ConfigResolver, KnownNetwork, ResolvedConfig,
    PLACEHOLDER_SEED_PHRASE,
};
use deployrc::{DeployrcError, OperationKind};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

const SEED: &str = "candy maple cake sugar pudding cream honey rich smooth crumble sweet treat";

const ALL_OPERATIONS: [OperationKind; 3] = [
    OperationKind::Submit,
    OperationKind::Build,
    OperationKind::LocalOnly,
];

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn full_env() -> HashMap<String, String> {
    env(&[("MNEMONIC", SEED), ("INFURA_API_KEY", "abc123")])
}

fn resolve_defaults(
    env: &HashMap<String, String>,
    operation: OperationKind,
) -> deployrc::Result<ResolvedConfig> {
    resolve(env, operation, &KnownNetwork::defaults())
}

#[test]
fn build_resolves_known_plus_local_profiles() {
    let config = resolve_defaults(&HashMap::new(), OperationKind::Build).unwrap();

    let names: Vec<_> = config.profiles.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        ["goerli", "hardhat", "kovan", "localhost", "mainnet", "rinkeby", "ropsten"]
    );
    assert!(config.profile(&config.default_profile).is_some());
}

#[test]
fn submit_without_mnemonic_names_it() {
    let err = resolve_defaults(&env(&[("INFURA_API_KEY", "abc123")]), OperationKind::Submit)
        .unwrap_err();
    assert!(matches!(err, DeployrcError::MissingSecret { ref name } if name == "MNEMONIC"));
}

#[test]
fn submit_without_any_secret_reports_mnemonic_first() {
    let err = resolve_defaults(&HashMap::new(), OperationKind::Submit).unwrap_err();
    assert!(matches!(err, DeployrcError::MissingSecret { ref name } if name == "MNEMONIC"));
}

#[test]
fn submit_without_api_key_names_it() {
    let err = resolve_defaults(&env(&[("MNEMONIC", SEED)]), OperationKind::Submit).unwrap_err();
    assert!(
        matches!(err, DeployrcError::MissingSecret { ref name } if name == "INFURA_API_KEY")
    );
}

#[test]
fn submit_with_secrets_embeds_key_in_every_remote_endpoint() {
    let config = resolve_defaults(&full_env(), OperationKind::Submit).unwrap();

    for profile in config.profiles.values().filter(|p| !p.is_local()) {
        assert!(
            profile.endpoint_url.contains("abc123"),
            "{} endpoint {}",
            profile.name,
            profile.endpoint_url
        );
        assert_eq!(profile.accounts.seed_phrase, SEED);
    }
    assert_eq!(
        config.profile("kovan").unwrap().endpoint_url,
        "https://kovan.infura.io/v3/abc123"
    );
}

#[test]
fn local_only_ignores_missing_secrets() {
    let config = resolve_defaults(&HashMap::new(), OperationKind::LocalOnly).unwrap();

    for profile in config.profiles.values() {
        assert_eq!(profile.accounts.seed_phrase, PLACEHOLDER_SEED_PHRASE);
    }
    assert_eq!(config.operation, OperationKind::LocalOnly);
}

#[test]
fn local_only_uses_supplied_mnemonic() {
    let config = resolve_defaults(&env(&[("MNEMONIC", SEED)]), OperationKind::LocalOnly).unwrap();
    assert_eq!(
        config.profile("hardhat").unwrap().accounts.seed_phrase,
        SEED
    );
}

#[test]
fn resolution_is_idempotent() {
    for operation in [OperationKind::Build, OperationKind::Submit] {
        let env = full_env();
        let first = resolve_defaults(&env, operation).unwrap();
        let second = resolve_defaults(&env, operation).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn duplicate_names_fail_for_every_operation() {
    let networks = vec![KnownNetwork::new("goerli", 5), KnownNetwork::new("goerli", 6)];

    for operation in ALL_OPERATIONS {
        let err = resolve(&full_env(), operation, &networks).unwrap_err();
        assert!(
            matches!(err, DeployrcError::DuplicateProfileName { ref name } if name == "goerli"),
            "{:?} gave {:?}",
            operation,
            err
        );
    }
}

#[test]
fn duplicates_are_reported_before_missing_secrets() {
    let networks = vec![KnownNetwork::new("goerli", 5), KnownNetwork::new("goerli", 6)];
    let err = resolve(&HashMap::new(), OperationKind::Submit, &networks).unwrap_err();
    assert!(matches!(err, DeployrcError::DuplicateProfileName { .. }));
}

#[test]
fn catalog_reusing_local_name_is_a_duplicate() {
    let networks = vec![KnownNetwork::new("localhost", 9999)];
    let err = resolve(&HashMap::new(), OperationKind::Build, &networks).unwrap_err();
    assert!(
        matches!(err, DeployrcError::DuplicateProfileName { ref name } if name == "localhost")
    );
}

#[test]
fn unknown_default_profile_is_rejected() {
    let err = ConfigResolver::new()
        .with_default_profile("sepolia")
        .resolve(&HashMap::new(), OperationKind::Build, &KnownNetwork::defaults())
        .unwrap_err();
    assert!(
        matches!(err, DeployrcError::UnknownDefaultProfile { ref name } if name == "sepolia")
    );
}

#[test]
fn duplicate_chain_ids_are_rejected() {
    let networks = vec![KnownNetwork::new("goerli", 5), KnownNetwork::new("other", 5)];
    let err = resolve(&HashMap::new(), OperationKind::Build, &networks).unwrap_err();
    assert!(matches!(err, DeployrcError::ConfigValidationError { .. }));
}

#[test]
fn empty_values_count_as_absent() {
    let err = resolve_defaults(
        &env(&[("MNEMONIC", ""), ("INFURA_API_KEY", "abc123")]),
        OperationKind::Submit,
    )
    .unwrap_err();
    assert!(matches!(err, DeployrcError::MissingSecret { ref name } if name == "MNEMONIC"));
}

#[test]
fn keyless_catalog_submits_without_api_key() {
    let networks =
        vec![KnownNetwork::new("polygon", 137).with_url_template("https://polygon-rpc.com")];
    let config = resolve(&env(&[("MNEMONIC", SEED)]), OperationKind::Submit, &networks).unwrap();
    assert_eq!(
        config.profile("polygon").unwrap().endpoint_url,
        "https://polygon-rpc.com"
    );
}

#[test]
fn env_file_and_catalog_feed_the_resolver() {
    let temp = TempDir::new().unwrap();
    let env_file = temp.path().join(".env");
    fs::write(&env_file, format!("MNEMONIC=\"{}\"\nINFURA_API_KEY=from-file\n", SEED)).unwrap();
    let catalog = temp.path().join("networks.yml");
    fs::write(&catalog, "- name: sepolia\n  chain_id: 11155111\n").unwrap();

    let stack = load_environment(&env_file, true, env(&[("INFURA_API_KEY", "from-shell")])).unwrap();
    let networks = load_networks_file(&catalog).unwrap();
    let config = ConfigResolver::new()
        .resolve(&stack.resolved(), OperationKind::Submit, &networks)
        .unwrap();

    assert_eq!(stack.source_of("INFURA_API_KEY"), Some("process"));
    assert_eq!(
        config.profile("sepolia").unwrap().endpoint_url,
        "https://sepolia.infura.io/v3/from-shell"
    );
    assert_eq!(config.profile("sepolia").unwrap().accounts.seed_phrase, SEED);
}

#[test]
fn optional_settings_follow_the_environment() {
    let config = resolve_defaults(
        &env(&[
            ("REPORT_GAS", "1"),
            ("CODE_COVERAGE", "true"),
            ("FORKING_URL", "https://archive.example/v2/key"),
            ("FORKING_BLOCK", "13000000"),
            ("ETHERSCAN_API_KEY", "scan-key"),
        ]),
        OperationKind::Build,
    )
    .unwrap();

    assert!(config.gas_reporter.enabled);
    assert_eq!(config.secret("verification_api_key"), Some("scan-key"));
    let sim = config.profile("hardhat").unwrap().simulation.clone().unwrap();
    assert_eq!(sim.hardfork, deployrc::config::Hardfork::Berlin);
    assert!(sim.forking.enabled);
    assert_eq!(sim.forking.block_number, 13_000_000);
    assert!(config
        .secret_values()
        .contains(&"https://archive.example/v2/key".to_string()));
}

#[test]
fn resolved_config_round_trips_through_json() {
    let config = resolve_defaults(&full_env(), OperationKind::Submit).unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back: ResolvedConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
