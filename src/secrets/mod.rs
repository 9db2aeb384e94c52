//! Secret detection and masking.
//!
//! - [`SecretPattern`] - Defines a pattern for identifying secrets
//! - [`SecretMatcher`] - Matches environment variable names against secret patterns
//! - [`OutputMasker`] - Masks secret values in printed output
//! - [`BUILTIN_PATTERNS`] - Built-in patterns for common secrets
//!
//! # Example
//!
//! ```
//! use deployrc::secrets::{OutputMasker, SecretMatcher};
//!
//! let matcher = SecretMatcher::with_builtins();
//! assert!(matcher.is_secret("ETHERSCAN_API_KEY"));
//!
//! let mut masker = OutputMasker::new();
//! masker.add_secret("super-secret-value");
//! assert!(!masker.mask("key: super-secret-value").contains("super-secret-value"));
//! ```

pub mod mask;
pub mod pattern;

pub use mask::{OutputMasker, REDACTED};
pub use pattern::{SecretMatcher, SecretPattern, BUILTIN_PATTERNS};
