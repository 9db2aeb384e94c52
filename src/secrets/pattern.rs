//! Secret pattern matching.
//!
//! Decides which environment variables carry secrets by matching their names
//! against patterns, so their values can be masked before display.

use regex::Regex;

/// A pattern that identifies secret values.
#[derive(Debug, Clone)]
pub struct SecretPattern {
    /// Name of this pattern (for debugging).
    pub name: String,
    /// Regex pattern to match environment variable names.
    pub env_pattern: Regex,
}

/// Built-in patterns for common secrets.
///
/// Each tuple contains (name, regex_pattern).
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("api_key", r"(?i)^.*_?(API_?KEY|APIKEY)$"),
    ("secret", r"(?i)^.*_?(SECRET|SECRET_KEY)$"),
    ("token", r"(?i)^.*_?TOKEN$"),
    ("password", r"(?i)^.*_?(PASSWORD|PASSWD|PWD)$"),
    ("mnemonic", r"(?i)^.*_?(MNEMONIC|SEED_PHRASE)$"),
    ("private_key", r"(?i)^.*_?PRIVATE_KEY$"),
    // Provider URLs usually embed the API key in the path.
    ("rpc_url", r"(?i)^(FORKING_URL|.*_RPC_URL)$"),
];

/// Matches environment variable names against secret patterns.
///
/// # Example
///
/// ```
/// use deployrc::secrets::SecretMatcher;
///
/// let matcher = SecretMatcher::with_builtins();
///
/// assert!(matcher.is_secret("MNEMONIC"));
/// assert!(matcher.is_secret("INFURA_API_KEY"));
/// assert!(matcher.is_secret("FORKING_URL"));
///
/// assert!(!matcher.is_secret("FORKING_BLOCK"));
/// assert!(!matcher.is_secret("REPORT_GAS"));
/// ```
#[derive(Debug, Clone)]
pub struct SecretMatcher {
    patterns: Vec<SecretPattern>,
}

impl SecretMatcher {
    /// Create a matcher with built-in patterns.
    pub fn with_builtins() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .filter_map(|(name, pattern)| {
                Regex::new(pattern).ok().map(|env_pattern| SecretPattern {
                    name: name.to_string(),
                    env_pattern,
                })
            })
            .collect();

        Self { patterns }
    }

    /// Check if an environment variable name matches any secret pattern.
    pub fn is_secret(&self, env_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.env_pattern.is_match(env_name))
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONSUMED_VARS;

    #[test]
    fn every_builtin_compiles() {
        let matcher = SecretMatcher::with_builtins();
        let names: Vec<_> = matcher.patterns.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<_> = BUILTIN_PATTERNS.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn classifies_consumed_variables() {
        let matcher = SecretMatcher::default();

        let secrets: Vec<_> = CONSUMED_VARS
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| matcher.is_secret(name))
            .collect();

        assert_eq!(
            secrets,
            [
                "MNEMONIC",
                "INFURA_API_KEY",
                "ETHERSCAN_API_KEY",
                "FORKING_URL",
                "COINMARKETCAP_API_KEY"
            ]
        );
    }

    #[test]
    fn matches_key_variants() {
        let matcher = SecretMatcher::with_builtins();

        assert!(matcher.is_secret("ALCHEMY_APIKEY"));
        assert!(matcher.is_secret("deployer_private_key"));
        assert!(matcher.is_secret("WALLET_SEED_PHRASE"));
        assert!(matcher.is_secret("GITHUB_TOKEN"));
        assert!(matcher.is_secret("POLYGON_RPC_URL"));
    }

    #[test]
    fn does_not_match_non_secrets() {
        let matcher = SecretMatcher::with_builtins();

        assert!(!matcher.is_secret("PATH"));
        assert!(!matcher.is_secret("CODE_COVERAGE"));
        assert!(!matcher.is_secret("FORKING_BLOCK"));
    }
}
