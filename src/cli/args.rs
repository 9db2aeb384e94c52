//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::operation::OperationKind;

/// deployrc - Network configuration for contract build and deploy pipelines.
#[derive(Debug, Parser)]
#[command(name = "deployrc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Env file layered under the process environment (default: .env, optional)
    #[arg(long, global = true, env = "DEPLOYRC_ENV_FILE", value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// YAML network catalog replacing the built-in networks
    #[arg(long, global = true, env = "DEPLOYRC_NETWORKS", value_name = "PATH")]
    pub networks: Option<PathBuf>,

    /// Profile used when none is selected
    #[arg(long, global = true, value_name = "NAME")]
    pub default_network: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the resolved configuration (default if no command specified)
    Show(ShowArgs),

    /// Resolve and validate without printing the configuration
    Check(CheckArgs),

    /// List resolved network profiles
    Networks(NetworksArgs),

    /// Show the environment variables deployrc reads
    Env(EnvArgs),

    /// Print the JSON Schema of the resolved configuration
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// How the operation kind is chosen.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OperationArgs {
    /// Operation to resolve for: submit, build or local (default: inferred from TASK)
    #[arg(long, value_name = "KIND")]
    pub operation: Option<OperationKind>,

    /// Toolchain task arguments, e.g. `-- deploy --network goerli`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "TASK")]
    pub task: Vec<String>,
}

impl OperationArgs {
    /// The explicit operation, or the one inferred from the task arguments.
    pub fn kind(&self) -> OperationKind {
        self.operation
            .unwrap_or_else(|| OperationKind::infer_from_args(&self.task))
    }
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub operation: OperationArgs,

    /// Output as JSON
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Output as YAML (default)
    #[arg(long)]
    pub yaml: bool,

    /// Print secret values instead of masking them
    #[arg(long)]
    pub reveal_secrets: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub operation: OperationArgs,
}

/// Arguments for the `networks` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NetworksArgs {
    /// Operation to resolve for: submit, build or local
    #[arg(long, value_name = "KIND", default_value = "build")]
    pub operation: OperationKind,

    /// Only list profiles carrying this tag (production, staging, local, test)
    #[arg(long)]
    pub tag: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::parse_from(["deployrc"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_infers_operation_from_task() {
        let cli = Cli::parse_from(["deployrc", "show", "--", "deploy", "--network", "goerli"]);
        match cli.command {
            Some(Commands::Show(args)) => {
                assert_eq!(args.operation.task, ["deploy", "--network", "goerli"]);
                assert_eq!(args.operation.kind(), OperationKind::Submit);
            }
            other => panic!("Expected Show command, got {:?}", other),
        }
    }

    #[test]
    fn explicit_operation_wins_over_task() {
        let cli = Cli::parse_from(["deployrc", "check", "--operation", "local", "--", "deploy"]);
        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.operation.kind(), OperationKind::LocalOnly);
            }
            other => panic!("Expected Check command, got {:?}", other),
        }
    }

    #[test]
    fn invalid_operation_is_rejected() {
        let result = Cli::try_parse_from(["deployrc", "check", "--operation", "publish"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "deployrc",
            "networks",
            "--env-file",
            "prod.env",
            "--networks",
            "nets.yml",
            "--json",
        ]);
        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
        assert_eq!(cli.networks, Some(PathBuf::from("nets.yml")));
        assert!(matches!(cli.command, Some(Commands::Networks(args)) if args.json));
    }

    #[test]
    fn json_and_yaml_conflict() {
        let result = Cli::try_parse_from(["deployrc", "show", "--json", "--yaml"]);
        assert!(result.is_err());
    }
}
