//! deployrc - Environment-driven network configuration for contract pipelines.
//!
//! deployrc turns the process environment (plus an optional `.env` file)
//! into a validated set of network profiles and build settings for a
//! smart-contract compile, test and deploy toolchain. Secrets are required
//! only when an operation submits to a remote network.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Environment loading, resolution and validation
//! - [`error`] - Error types and result aliases
//! - [`operation`] - Operation kinds and task inference
//! - [`secrets`] - Secret detection and output masking
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use deployrc::config::{resolve, KnownNetwork};
//! use deployrc::{DeployrcError, OperationKind};
//! use std::collections::HashMap;
//!
//! // Compiling works without any secrets.
//! let config = resolve(&HashMap::new(), OperationKind::Build, &KnownNetwork::defaults()).unwrap();
//! assert_eq!(config.profiles.len(), 7);
//!
//! // Submitting does not.
//! let err = resolve(&HashMap::new(), OperationKind::Submit, &KnownNetwork::defaults()).unwrap_err();
//! assert!(matches!(err, DeployrcError::MissingSecret { ref name } if name == "MNEMONIC"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod operation;
pub mod secrets;
pub mod ui;

pub use error::{DeployrcError, Result};
pub use operation::OperationKind;
