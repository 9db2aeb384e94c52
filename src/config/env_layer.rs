//! Environment variable layering.
//!
//! The environment handed to the resolver is assembled from layers: the
//! `.env` file at the bottom, the process environment on top. A variable that
//! is already set in the process is never overridden by the file, matching
//! the usual dotenv behavior. Each value remembers the layer it came from so
//! the `env` command can report it.

use crate::config::env_file::EnvFileParser;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// Default env file name, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Source name of the process environment layer.
pub const PROCESS_LAYER: &str = "process";

/// Represents a layer of environment variables.
///
/// # Example
///
/// ```
/// use deployrc::config::EnvLayer;
///
/// let mut layer = EnvLayer::new(".env");
/// layer.set("INFURA_API_KEY", "abc123");
///
/// assert_eq!(layer.vars.get("INFURA_API_KEY").map(String::as_str), Some("abc123"));
/// assert_eq!(layer.source, ".env");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvLayer {
    /// Variables in this layer.
    pub vars: HashMap<String, String>,
    /// Source of this layer (for debugging).
    pub source: String,
}

impl EnvLayer {
    /// Create a new layer with the given source name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            vars: HashMap::new(),
            source: source.into(),
        }
    }

    /// Create a layer holding an existing map.
    pub fn from_vars(source: impl Into<String>, vars: HashMap<String, String>) -> Self {
        Self {
            vars,
            source: source.into(),
        }
    }

    /// Add a variable to this layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }
}

/// Manages layered environment variables.
///
/// The first layer pushed has lowest priority, the last has highest.
///
/// # Example
///
/// ```
/// use deployrc::config::{EnvLayer, EnvLayerStack};
///
/// let mut stack = EnvLayerStack::new();
///
/// let mut file = EnvLayer::new(".env");
/// file.set("MNEMONIC", "from file");
/// file.set("REPORT_GAS", "1");
/// stack.push(file);
///
/// let mut process = EnvLayer::new("process");
/// process.set("MNEMONIC", "from shell");
/// stack.push(process);
///
/// assert_eq!(stack.get("MNEMONIC"), Some("from shell"));
/// assert_eq!(stack.get("REPORT_GAS"), Some("1"));
/// assert_eq!(stack.source_of("MNEMONIC"), Some("process"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvLayerStack {
    /// Layers from lowest to highest priority.
    layers: Vec<EnvLayer>,
}

impl EnvLayerStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Add a layer on top of the existing ones.
    pub fn push(&mut self, layer: EnvLayer) {
        self.layers.push(layer);
    }

    /// Get the value from the highest priority layer that contains the key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.vars.get(key))
            .map(String::as_str)
    }

    /// Flatten all layers into a single map.
    pub fn resolved(&self) -> HashMap<String, String> {
        let mut result = HashMap::new();
        for layer in &self.layers {
            result.extend(layer.vars.clone());
        }
        result
    }

    /// Get the source of the layer that supplies a variable's value.
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.vars.contains_key(key))
            .map(|layer| layer.source.as_str())
    }
}

/// Build the environment stack from an env file and the process environment.
///
/// When `required` is false a missing env file is skipped; when true (the
/// user named the file explicitly) it is a `ConfigNotFound` error.
pub fn load_environment(
    env_file: &Path,
    required: bool,
    process_env: HashMap<String, String>,
) -> Result<EnvLayerStack> {
    let file_vars = if required {
        EnvFileParser::load(env_file)?
    } else {
        EnvFileParser::load_optional(env_file)?
    };

    tracing::debug!(
        "Loaded {} variables from {}",
        file_vars.len(),
        env_file.display()
    );

    let mut stack = EnvLayerStack::new();
    stack.push(EnvLayer::from_vars(
        env_file.display().to_string(),
        file_vars,
    ));
    stack.push(EnvLayer::from_vars(PROCESS_LAYER, process_env));
    Ok(stack)
}

/// Snapshot the current process environment.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}
