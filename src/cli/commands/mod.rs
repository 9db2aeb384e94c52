//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that resolve a
//! configuration share [`ResolveInputs`], built once from the global flags.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod env;
pub mod inputs;
pub mod networks;
pub mod schema;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use inputs::{Resolution, ResolveInputs};
