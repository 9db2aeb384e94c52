//! Network configuration resolution and validation.
//!
//! This module handles every step from raw environment to validated config:
//! - `.env` parsing in [`env_file`]
//! - Environment layering in [`env_layer`]
//! - Endpoint template interpolation in [`interpolation`]
//! - The known network catalog in [`networks`]
//! - Resolution in [`resolver`]
//! - Output types in [`schema`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use deployrc::config::{resolve, KnownNetwork};
//! use deployrc::OperationKind;
//! use std::collections::HashMap;
//!
//! let config = resolve(&HashMap::new(), OperationKind::LocalOnly, &KnownNetwork::defaults()).unwrap();
//! assert_eq!(config.default_profile, "hardhat");
//! assert!(config.profile("hardhat").unwrap().accounts.uses_placeholder());
//! ```

pub mod env_file;
pub mod env_layer;
pub mod interpolation;
pub mod networks;
pub mod resolver;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{
    AbiExporterSettings, AccountDerivation, BuildPaths, ContractSizerSettings, DocgenSettings,
    ForkingSettings, GasReporterSettings, Hardfork, NetworkProfile, ResolvedConfig,
    SimulationSettings, WatcherSettings, PLACEHOLDER_SEED_PHRASE, SIMULATION_ACCOUNT_COUNT,
};

// Resolver re-exports
pub use resolver::{lookup, resolve, ConfigResolver, CONSUMED_VARS, SECRET_VARS};

// Network re-exports
pub use networks::{load_networks_file, parse_networks, KnownNetwork};

// Validator re-exports
pub use validator::{check_unique_names, validate, validate_config, ValidationError};

// Interpolation re-exports
pub use interpolation::{
    extract_variables, parse_interpolation, resolve_string, InterpolationContext, Segment,
};

// Env layer re-exports
pub use env_layer::{load_environment, process_env, EnvLayer, EnvLayerStack, DEFAULT_ENV_FILE};

// Env file re-exports
pub use env_file::EnvFileParser;
