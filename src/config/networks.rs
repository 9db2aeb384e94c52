//! Known remote networks and the always-present local profiles.
//!
//! A [`KnownNetwork`] is the fixed part of a remote profile: its name, chain
//! id, and an endpoint URL template. The resolver turns each one into a
//! [`NetworkProfile`](super::NetworkProfile) by interpolating the template
//! against the environment.

use crate::config::interpolation::extract_variables;
use crate::error::{DeployrcError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the endpoint provider API key.
pub const ENDPOINT_API_KEY_VAR: &str = "INFURA_API_KEY";

/// Template shared by the default remote networks.
pub const INFURA_URL_TEMPLATE: &str = "https://${network}.infura.io/v3/${INFURA_API_KEY}";

/// Name of the designated mainnet profile.
pub const MAINNET: &str = "mainnet";

/// Name of the in-process simulation profile.
pub const LOCAL_SIMULATION: &str = "hardhat";

/// Chain id of the in-process simulation profile.
pub const LOCAL_SIMULATION_CHAIN_ID: u64 = 31337;

/// Name of the local node profile.
pub const LOCALHOST: &str = "localhost";

/// Chain id of the local node profile.
pub const LOCALHOST_CHAIN_ID: u64 = 1337;

/// Endpoint of the local node profile.
pub const LOCALHOST_URL: &str = "http://127.0.0.1:8545";

/// Endpoint shown for forking when `FORKING_URL` is unset.
pub const FORKING_URL_PLACEHOLDER: &str = "https://eth-mainnet.alchemyapi.io/v2/<key>";

pub const TAG_PRODUCTION: &str = "production";
pub const TAG_STAGING: &str = "staging";
pub const TAG_LOCAL: &str = "local";
pub const TAG_TEST: &str = "test";

/// A remote network the pipeline can deploy to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KnownNetwork {
    /// Profile name
    pub name: String,

    /// Chain id
    pub chain_id: u64,

    /// Endpoint URL template, may reference `${network}` and environment variables
    #[serde(default = "default_url_template")]
    pub url_template: String,
}

fn default_url_template() -> String {
    INFURA_URL_TEMPLATE.to_string()
}

impl KnownNetwork {
    /// Create a network using the default endpoint template.
    pub fn new(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
            url_template: default_url_template(),
        }
    }

    /// Use a custom endpoint template.
    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    /// Whether the endpoint template needs the provider API key.
    pub fn requires_api_key(&self) -> bool {
        extract_variables(&self.url_template).contains(ENDPOINT_API_KEY_VAR)
    }

    /// The default remote networks.
    ///
    /// # Example
    ///
    /// ```
    /// use deployrc::config::KnownNetwork;
    ///
    /// let networks = KnownNetwork::defaults();
    /// let mainnet = networks.iter().find(|n| n.name == "mainnet").unwrap();
    /// assert_eq!(mainnet.chain_id, 1);
    /// assert!(mainnet.requires_api_key());
    /// ```
    pub fn defaults() -> Vec<Self> {
        [
            ("goerli", 5),
            ("kovan", 42),
            ("rinkeby", 4),
            ("ropsten", 3),
            (MAINNET, 1),
        ]
        .into_iter()
        .map(|(name, chain_id)| Self::new(name, chain_id))
        .collect()
    }
}

/// Load a network catalog from a YAML file.
///
/// The file holds a list of networks:
///
/// ```yaml
/// - name: sepolia
///   chain_id: 11155111
/// - name: polygon
///   chain_id: 137
///   url_template: "https://polygon-rpc.com"
/// ```
///
/// Order is preserved and duplicate names are left for the resolver to reject.
pub fn load_networks_file(path: &Path) -> Result<Vec<KnownNetwork>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DeployrcError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DeployrcError::Io(e)
        }
    })?;

    parse_networks(&content, path)
}

/// Parse a YAML network catalog.
pub fn parse_networks(content: &str, source_path: &Path) -> Result<Vec<KnownNetwork>> {
    serde_yaml::from_str(content).map_err(|e| DeployrcError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
