//! .env file parsing.
//!
//! Secrets such as `MNEMONIC` and `INFURA_API_KEY` usually live in a `.env`
//! file next to the project rather than in the shell environment. This module
//! parses that file in the standard KEY=value format.

use crate::error::{DeployrcError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Exported: `export KEY=value`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use deployrc::config::EnvFileParser;
/// use std::path::Path;
///
/// let content = r#"
/// ## Deployer account
/// MNEMONIC="test test test test test test test test test test test junk"
/// export INFURA_API_KEY=abc123
/// REPORT_GAS=
/// "#;
///
/// let vars = EnvFileParser::parse(content, Path::new(".env")).unwrap();
/// assert_eq!(vars.get("INFURA_API_KEY"), Some(&"abc123".to_string()));
/// assert_eq!(vars.get("REPORT_GAS"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse env file content into a map of variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` naming `source_path` and the line number for
    /// any non-comment line without `=` or with an empty key.
    pub fn parse(content: &str, source_path: &Path) -> Result<HashMap<String, String>> {
        let mut vars = HashMap::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line) {
                Some((key, value)) => {
                    vars.insert(key, value);
                }
                None => {
                    return Err(DeployrcError::ConfigParseError {
                        path: source_path.to_path_buf(),
                        message: format!("Invalid line {}: {}", line_num + 1, line),
                    });
                }
            }
        }

        Ok(vars)
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        Some((key.to_string(), Self::unquote(value.trim())))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse an env file from a path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file doesn't exist.
    pub fn load(path: &Path) -> Result<HashMap<String, String>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeployrcError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DeployrcError::Io(e)
            }
        })?;
        Self::parse(&content, path)
    }

    /// Load and parse an env file, returning an empty map if it doesn't exist.
    pub fn load_optional(path: &Path) -> Result<HashMap<String, String>> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No env file at {}", path.display());
            Ok(HashMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<HashMap<String, String>> {
        EnvFileParser::parse(content, Path::new(".env"))
    }

    #[test]
    fn parses_simple_env_file() {
        let vars = parse("MNEMONIC=alpha beta\nINFURA_API_KEY=abc\n").unwrap();

        assert_eq!(vars.get("MNEMONIC"), Some(&"alpha beta".to_string()));
        assert_eq!(vars.get("INFURA_API_KEY"), Some(&"abc".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = r#"
# Keys
ETHERSCAN_API_KEY=xyz

# Toggles
"#;
        let vars = parse(content).unwrap();

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("ETHERSCAN_API_KEY"), Some(&"xyz".to_string()));
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="double quoted"
SINGLE='single quoted'
UNQUOTED=no quotes
LONE="
"#;
        let vars = parse(content).unwrap();

        assert_eq!(vars.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(vars.get("UNQUOTED"), Some(&"no quotes".to_string()));
        assert_eq!(vars.get("LONE"), Some(&"\"".to_string()));
    }

    #[test]
    fn strips_export_prefix() {
        let vars = parse("export FORKING_BLOCK=14000000").unwrap();
        assert_eq!(vars.get("FORKING_BLOCK"), Some(&"14000000".to_string()));
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = parse("FORKING_URL=https://eth.example/v2?key=abc").unwrap();
        assert_eq!(
            vars.get("FORKING_URL"),
            Some(&"https://eth.example/v2?key=abc".to_string())
        );
    }

    #[test]
    fn handles_whitespace_around_equals() {
        let vars = parse("REPORT_GAS = true").unwrap();
        assert_eq!(vars.get("REPORT_GAS"), Some(&"true".to_string()));
    }

    #[test]
    fn rejects_lines_without_equals() {
        let result = parse("VALID=true\ninvalid line\nOTHER=value");
        match result {
            Err(DeployrcError::ConfigParseError { message, .. }) => {
                assert!(message.contains("line 2"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_keys() {
        assert!(parse("=value").is_err());
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "MNEMONIC=from file").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("MNEMONIC"), Some(&"from file".to_string()));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let result = EnvFileParser::load(Path::new("/nonexistent/.env"));
        assert!(matches!(result, Err(DeployrcError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_optional_returns_empty_for_missing_file() {
        let vars = EnvFileParser::load_optional(Path::new("/nonexistent/path/.env")).unwrap();
        assert!(vars.is_empty());
    }
}
