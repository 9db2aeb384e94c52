//! Input loading shared by the resolving commands.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::{
    load_environment, load_networks_file, ConfigResolver, EnvLayerStack, KnownNetwork,
    ResolvedConfig, DEFAULT_ENV_FILE,
};
use crate::error::Result;
use crate::operation::OperationKind;

/// Where a command reads its environment and network catalog from.
#[derive(Debug, Clone)]
pub struct ResolveInputs {
    env_file: PathBuf,
    env_file_required: bool,
    networks_file: Option<PathBuf>,
    default_profile: Option<String>,
    process_env: HashMap<String, String>,
}

impl ResolveInputs {
    /// Inputs with the defaults: optional `.env` in `working_dir`, built-in networks.
    pub fn new(working_dir: &Path, process_env: HashMap<String, String>) -> Self {
        Self {
            env_file: working_dir.join(DEFAULT_ENV_FILE),
            env_file_required: false,
            networks_file: None,
            default_profile: None,
            process_env,
        }
    }

    /// Inputs as selected by the global CLI flags.
    ///
    /// Relative paths are taken from `working_dir`.
    pub fn from_cli(working_dir: &Path, cli: &Cli, process_env: HashMap<String, String>) -> Self {
        let mut inputs = Self::new(working_dir, process_env);
        if let Some(path) = &cli.env_file {
            inputs = inputs.with_env_file(working_dir.join(path));
        }
        if let Some(path) = &cli.networks {
            inputs = inputs.with_networks_file(working_dir.join(path));
        }
        if let Some(name) = &cli.default_network {
            inputs = inputs.with_default_profile(name.clone());
        }
        inputs
    }

    /// Read an explicitly named env file. A missing file becomes an error.
    pub fn with_env_file(mut self, path: PathBuf) -> Self {
        self.env_file = path;
        self.env_file_required = true;
        self
    }

    /// Replace the built-in networks with a YAML catalog.
    pub fn with_networks_file(mut self, path: PathBuf) -> Self {
        self.networks_file = Some(path);
        self
    }

    /// Override the default profile.
    pub fn with_default_profile(mut self, name: String) -> Self {
        self.default_profile = Some(name);
        self
    }

    /// Path of the env file layer.
    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    /// Build the layered environment.
    pub fn load_env(&self) -> Result<EnvLayerStack> {
        load_environment(
            &self.env_file,
            self.env_file_required,
            self.process_env.clone(),
        )
    }

    /// Load the known network catalog.
    pub fn load_networks(&self) -> Result<Vec<KnownNetwork>> {
        match &self.networks_file {
            Some(path) => load_networks_file(path),
            None => Ok(KnownNetwork::defaults()),
        }
    }

    /// The resolver configured for these inputs.
    pub fn resolver(&self) -> ConfigResolver {
        match &self.default_profile {
            Some(name) => ConfigResolver::new().with_default_profile(name.clone()),
            None => ConfigResolver::new(),
        }
    }

    /// Load every input and resolve for `operation`.
    pub fn resolve(&self, operation: OperationKind) -> Result<Resolution> {
        let env = self.load_env()?;
        let networks = self.load_networks()?;
        tracing::debug!(
            "Resolving {} networks for {} operation",
            networks.len(),
            operation
        );
        let config = self
            .resolver()
            .resolve(&env.resolved(), operation, &networks)?;

        Ok(Resolution {
            env,
            networks,
            config,
        })
    }
}

/// A resolved configuration together with the inputs it came from.
#[derive(Debug)]
pub struct Resolution {
    /// The layered environment
    pub env: EnvLayerStack,
    /// The network catalog
    pub networks: Vec<KnownNetwork>,
    /// The resolved configuration
    pub config: ResolvedConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployrcError;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_dotenv_in_working_dir() {
        let temp = TempDir::new().unwrap();
        let inputs = ResolveInputs::new(temp.path(), HashMap::new());
        assert_eq!(inputs.env_file(), temp.path().join(".env"));
        assert_eq!(inputs.load_networks().unwrap(), KnownNetwork::defaults());
    }

    #[test]
    fn missing_default_env_file_is_fine() {
        let temp = TempDir::new().unwrap();
        let inputs = ResolveInputs::new(temp.path(), HashMap::new());
        let resolution = inputs.resolve(OperationKind::Build).unwrap();
        assert_eq!(resolution.config.profiles.len(), 7);
        assert_eq!(resolution.networks.len(), 5);
    }

    #[test]
    fn explicit_env_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let inputs = ResolveInputs::new(temp.path(), HashMap::new())
            .with_env_file(temp.path().join("prod.env"));
        let err = inputs.resolve(OperationKind::Build).unwrap_err();
        assert!(matches!(err, DeployrcError::ConfigNotFound { .. }));
    }

    #[test]
    fn process_env_wins_over_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".env"),
            "MNEMONIC=file words\nINFURA_API_KEY=from-file\n",
        )
        .unwrap();
        let process = HashMap::from([("INFURA_API_KEY".to_string(), "from-process".to_string())]);
        let inputs = ResolveInputs::new(temp.path(), process);

        let config = inputs.resolve(OperationKind::Submit).unwrap().config;
        assert_eq!(config.secret("endpoint_api_key"), Some("from-process"));
        assert_eq!(config.profile("goerli").unwrap().accounts.seed_phrase, "file words");
    }

    #[test]
    fn cli_flags_are_relative_to_working_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("nets.yml"),
            "- name: sepolia\n  chain_id: 11155111\n",
        )
        .unwrap();
        let cli = Cli::parse_from([
            "deployrc",
            "--networks",
            "nets.yml",
            "--default-network",
            "sepolia",
        ]);
        let inputs = ResolveInputs::from_cli(temp.path(), &cli, HashMap::new());

        let config = inputs.resolve(OperationKind::Build).unwrap().config;
        assert_eq!(config.default_profile, "sepolia");
        assert!(config.profile("goerli").is_none());
    }
}
