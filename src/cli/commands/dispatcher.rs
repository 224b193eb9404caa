//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::InstallerConfig;
use crate::error::Result;
use crate::shell::{CommandRunner, ShellRunner};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    base_dir: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl CommandDispatcher {
    /// Create a dispatcher that runs real shell commands.
    pub fn new(base_dir: PathBuf) -> Self {
        Self::with_runner(base_dir, Box::new(ShellRunner::new()))
    }

    /// Create a dispatcher with a custom command runner.
    pub fn with_runner(base_dir: PathBuf, runner: Box<dyn CommandRunner>) -> Self {
        Self { base_dir, runner }
    }

    /// Build the install configuration from global flags.
    pub fn install_config(&self, cli: &Cli) -> InstallerConfig {
        let mut config = InstallerConfig::new(&self.base_dir);
        if let Some(path) = &cli.config {
            config = config.with_preferences_path(path);
        }
        if let Some(command) = &cli.handoff {
            config = config.with_handoff(command);
        }
        if let Some(language) = cli.lang {
            config = config.with_language(language);
        }
        if let Some(fingerprint) = &cli.expect_fingerprint {
            config = config.with_expected_fingerprint(fingerprint);
        }
        config
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand runs the installer.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install) | None => {
                let cmd = super::install::InstallCommand::new(self.install_config(cli), &*self.runner);
                cmd.execute(ui)
            }
            Some(Commands::Fingerprint(args)) => {
                let cmd = super::fingerprint::FingerprintCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use crate::state::Language;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn install_config_reflects_flags() {
        let cli = Cli::try_parse_from([
            "ricsi",
            "--config",
            "/tmp/prefs.json",
            "--handoff",
            "npm start",
            "--lang",
            "ru",
            "--expect-fingerprint",
            "ABC",
        ])
        .unwrap();
        let dispatcher = CommandDispatcher::new(PathBuf::from("/work"));

        let config = dispatcher.install_config(&cli);

        assert_eq!(config.base_dir, PathBuf::from("/work"));
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.handoff_command, "npm start");
        assert_eq!(config.language, Some(Language::Ru));
        assert_eq!(config.expectation.fingerprint.as_deref(), Some("ABC"));
    }

    #[test]
    fn default_dispatch_runs_install() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["ricsi", "--lang", "en"]).unwrap();
        let runner = ScriptedRunner::new().fail("node -v", 127, "node: not found");
        let dispatcher = CommandDispatcher::with_runner(temp.path().to_path_buf(), Box::new(runner));
        let mut ui = MockUI::new();

        let err = dispatcher.dispatch(&cli, &mut ui).unwrap_err();
        assert!(err.is_fatal());
    }
}
