//! Output masking for secret values.

use serde_yaml::Value;

use crate::config::ResolvedConfig;

/// Default replacement for masked values.
pub const REDACTED: &str = "[REDACTED]";

/// Masks secret values in output.
///
/// # Example
///
/// ```
/// use deployrc::secrets::OutputMasker;
///
/// let mut masker = OutputMasker::new();
/// masker.add_secret("abc123");
///
/// let output = masker.mask("url: https://goerli.infura.io/v3/abc123");
/// assert_eq!(output, "url: https://goerli.infura.io/v3/[REDACTED]");
/// ```
#[derive(Debug, Clone)]
pub struct OutputMasker {
    /// Secret values, longest first so overlapping secrets mask fully.
    secrets: Vec<String>,
    /// The mask string to use.
    mask: String,
}

impl OutputMasker {
    /// Create a new masker with default mask string.
    pub fn new() -> Self {
        Self::with_mask(REDACTED)
    }

    /// Create a masker with a custom mask string.
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self {
            secrets: Vec::new(),
            mask: mask.into(),
        }
    }

    /// Create a masker for every secret held by a resolved configuration.
    pub fn for_config(config: &ResolvedConfig) -> Self {
        let mut masker = Self::new();
        masker.add_secrets(config.secret_values());
        masker
    }

    /// Register a secret value to be masked.
    ///
    /// Empty strings and duplicates are ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() || self.secrets.contains(&value) {
            return;
        }
        self.secrets.push(value);
        self.secrets
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    }

    /// Register multiple secret values.
    pub fn add_secrets(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
        for value in values {
            self.add_secret(value);
        }
    }

    /// Mask any secret values in the given string.
    pub fn mask(&self, input: &str) -> String {
        self.secrets
            .iter()
            .fold(input.to_string(), |acc, secret| acc.replace(secret, &self.mask))
    }

    /// Mask secret values inside the string leaves of a document.
    ///
    /// Keys, numbers and booleans are left alone, so the document keeps its
    /// shape however short a secret is.
    pub fn mask_value(&self, value: &mut Value) {
        match value {
            Value::String(s) => {
                if self.secrets.iter().any(|secret| s.contains(secret.as_str())) {
                    *s = self.mask(s);
                }
            }
            Value::Sequence(items) => {
                for item in items {
                    self.mask_value(item);
                }
            }
            Value::Mapping(map) => {
                for item in map.values_mut() {
                    self.mask_value(item);
                }
            }
            Value::Tagged(tagged) => self.mask_value(&mut tagged.value),
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
}

impl Default for OutputMasker {
    fn default() -> Self {
        Self::new()
    }
}
