//! Command runner abstraction.
//!
//! Every external command the installer issues (version checks, ping probes,
//! `git clone`, the hand-off stage) goes through [`CommandRunner`]. The
//! production implementation is [`ShellRunner`]; tests drive the pipeline
//! with [`ScriptedRunner`](super::mock::ScriptedRunner).

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::InstallerError;

use super::platform::{shell_flag, shell_program};

/// Options for a single runner invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Do not log stderr when the command fails.
    pub silent_on_error: bool,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Extra environment variables.
    pub env: HashMap<String, String>,

    /// Stream output to the terminal instead of capturing it.
    pub inherit_stdio: bool,
}

impl RunOptions {
    /// Options for probes whose failure is an expected answer.
    pub fn silent() -> Self {
        Self {
            silent_on_error: true,
            ..Default::default()
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Stream output to the terminal.
    pub fn inherited(mut self) -> Self {
        self.inherit_stdio = true;
        self
    }
}

/// A command that exited nonzero or could not be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// The command string.
    pub command: String,
    /// Exit code; `None` for spawn errors and signals.
    pub exit_code: Option<i32>,
    /// Captured stderr, or the spawn error text.
    pub stderr: String,
}

impl CommandFailure {
    /// One-line description for status output.
    pub fn summary(&self) -> String {
        let detail = self.stderr.lines().last().unwrap_or("").trim();
        match (self.exit_code, detail.is_empty()) {
            (Some(code), true) => format!("exit code {}", code),
            (Some(code), false) => format!("exit code {}: {}", code, detail),
            (None, true) => "could not start".to_string(),
            (None, false) => detail.to_string(),
        }
    }
}

impl From<CommandFailure> for InstallerError {
    fn from(failure: CommandFailure) -> Self {
        InstallerError::CommandFailed {
            command: failure.command,
            code: failure.exit_code,
            stderr: failure.stderr,
        }
    }
}

/// Outcome of a runner invocation: trimmed stdout or the failure.
pub type RunOutcome = std::result::Result<String, CommandFailure>;

/// Executes external commands.
///
/// Implementations must be shareable across threads: the network
/// classifier runs several probes through one runner at the same time.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion.
    fn run(&self, command: &str, options: &RunOptions) -> RunOutcome;
}

/// Runs commands through the platform shell (`sh -c` or `cmd.exe /C`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// Create a new shell runner.
    pub fn new() -> Self {
        Self
    }

    fn build(command: &str, options: &RunOptions) -> Command {
        let mut cmd = Command::new(shell_program());
        cmd.arg(shell_flag())
            .arg(command)
            .envs(&options.env)
            .stdin(Stdio::inherit());

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        if options.inherit_stdio {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        }
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, options: &RunOptions) -> RunOutcome {
        tracing::debug!("Running: {}", command);

        // Inherited streams leave stdout and stderr empty.
        let failure = match Self::build(command, options).output() {
            Ok(output) if output.status.success() => {
                return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
            }
            Ok(output) => CommandFailure {
                command: command.to_string(),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => CommandFailure {
                command: command.to_string(),
                exit_code: None,
                stderr: e.to_string(),
            },
        };

        if options.silent_on_error {
            tracing::debug!("'{}' failed: {}", command, failure.summary());
        } else {
            tracing::warn!("Command '{}' failed: {}", command, failure.stderr.trim());
        }

        Err(failure)
    }
}
