//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running `ricsi` without a
//! subcommand is the same as `ricsi install`.

pub mod completions;
pub mod dispatcher;
pub mod fingerprint;
pub mod install;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
