//! The kind of operation a configuration is resolved for.
//!
//! Whether secrets are mandatory depends entirely on what the caller is about
//! to do: submitting signed transactions to a real network needs a seed
//! phrase and an endpoint key, compiling or simulating locally does not.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task names that submit signed data to a network.
pub const SUBMIT_TASKS: &[&str] = &["deploy", "run"];

/// What the caller intends to do with the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Sends signed transactions to an external network.
    Submit,
    /// Compiles or otherwise processes sources without submitting anything.
    #[default]
    Build,
    /// Runs exclusively against local simulation networks.
    LocalOnly,
}

impl OperationKind {
    /// Infer the operation from the task arguments of a toolchain invocation.
    ///
    /// Any `deploy` or `run` argument means a submission; everything else is
    /// treated as a build.
    ///
    /// # Example
    ///
    /// ```
    /// use deployrc::OperationKind;
    ///
    /// let kind = OperationKind::infer_from_args(["deploy", "--network", "goerli"]);
    /// assert_eq!(kind, OperationKind::Submit);
    /// assert_eq!(OperationKind::infer_from_args(["compile"]), OperationKind::Build);
    /// ```
    pub fn infer_from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let submits = args
            .into_iter()
            .any(|arg| SUBMIT_TASKS.contains(&arg.as_ref()));
        if submits {
            Self::Submit
        } else {
            Self::Build
        }
    }

    /// Whether missing secrets are fatal for this operation.
    pub fn requires_secrets(&self) -> bool {
        matches!(self, Self::Submit)
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submit" => Ok(Self::Submit),
            "build" => Ok(Self::Build),
            "local" | "local-only" | "local_only" => Ok(Self::LocalOnly),
            _ => Err(format!(
                "unknown operation: {} (expected submit, build or local)",
                s
            )),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::Build => write!(f, "build"),
            Self::LocalOnly => write!(f, "local"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!("submit".parse::<OperationKind>(), Ok(OperationKind::Submit));
        assert_eq!("BUILD".parse::<OperationKind>(), Ok(OperationKind::Build));
        assert_eq!("local".parse::<OperationKind>(), Ok(OperationKind::LocalOnly));
        assert_eq!(
            "local-only".parse::<OperationKind>(),
            Ok(OperationKind::LocalOnly)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "publish".parse::<OperationKind>().unwrap_err();
        assert!(err.contains("publish"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [
            OperationKind::Submit,
            OperationKind::Build,
            OperationKind::LocalOnly,
        ] {
            assert_eq!(kind.to_string().parse::<OperationKind>(), Ok(kind));
        }
    }

    #[test]
    fn infers_submit_from_deploy_and_run() {
        assert_eq!(
            OperationKind::infer_from_args(["deploy"]),
            OperationKind::Submit
        );
        assert_eq!(
            OperationKind::infer_from_args(["run", "scripts/seed.js"]),
            OperationKind::Submit
        );
    }

    #[test]
    fn infers_build_otherwise() {
        assert_eq!(
            OperationKind::infer_from_args(["test", "--network", "hardhat"]),
            OperationKind::Build
        );
        assert_eq!(
            OperationKind::infer_from_args(Vec::<String>::new()),
            OperationKind::Build
        );
    }

    #[test]
    fn deploy_must_be_a_whole_argument() {
        assert_eq!(
            OperationKind::infer_from_args(["deployments:list"]),
            OperationKind::Build
        );
    }

    #[test]
    fn only_submit_requires_secrets() {
        assert!(OperationKind::Submit.requires_secrets());
        assert!(!OperationKind::Build.requires_secrets());
        assert!(!OperationKind::LocalOnly.requires_secrets());
    }
}
