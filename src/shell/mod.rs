//! Shell command execution.

pub mod mock;
pub mod platform;
pub mod runner;

pub use mock::{RecordedCommand, ScriptedResponse, ScriptedRunner};
pub use platform::{is_ci, quote_arg, PlatformKind};
pub use runner::{CommandFailure, CommandRunner, RunOptions, RunOutcome, ShellRunner};
