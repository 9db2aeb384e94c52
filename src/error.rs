//! Error types for deployrc operations.
//!
//! This module defines [`DeployrcError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Resolution failures (`MissingSecret`, `DuplicateProfileName`,
//!   `UnknownDefaultProfile`) are fatal and always name the offending identifier
//! - Input file problems (`ConfigNotFound`, `ConfigParseError`) name the path
//! - Use `anyhow::Error` (via `DeployrcError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for deployrc operations.
#[derive(Debug, Error)]
pub enum DeployrcError {
    /// A secret required by the current operation is not set.
    #[error("Missing secret {name}: set it in your environment or .env file before submitting")]
    MissingSecret { name: String },

    /// Two network profiles share the same name.
    #[error("Duplicate network profile name: {name}")]
    DuplicateProfileName { name: String },

    /// The configured default profile does not exist.
    #[error("Default profile '{name}' is not a known network profile")]
    UnknownDefaultProfile { name: String },

    /// Input file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse an input file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Resolved configuration violates an invariant.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeployrcError {
    /// Whether this error comes from resolving the environment, as opposed to
    /// reading an input file.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::MissingSecret { .. }
                | Self::DuplicateProfileName { .. }
                | Self::UnknownDefaultProfile { .. }
                | Self::ConfigValidationError { .. }
        )
    }

    /// Process exit code for this error: 1 for resolution failures, 2 for
    /// unreadable or malformed input.
    pub fn exit_code(&self) -> u8 {
        if self.is_resolution_error() {
            1
        } else {
            2
        }
    }
}

/// Result type alias for deployrc operations.
pub type Result<T> = std::result::Result<T, DeployrcError>;
