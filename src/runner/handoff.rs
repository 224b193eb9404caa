//! The next-stage command run inside the acquired repository.

use std::path::Path;

use crate::config::LANGUAGE_ENV;
use crate::shell::{CommandRunner, RunOptions};
use crate::state::Language;
use crate::ui::UserInterface;

/// How the hand-off command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffResult {
    pub command: String,
    /// `None` when the command could not be started or was killed.
    pub exit_code: Option<i32>,
}

impl HandoffResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `command` in `cwd` with the terminal attached.
///
/// The outcome is reported, never propagated: whatever the command does,
/// the installer's own run is complete.
pub fn run_handoff(
    runner: &dyn CommandRunner,
    command: &str,
    cwd: &Path,
    language: Language,
    ui: &mut dyn UserInterface,
) -> HandoffResult {
    ui.message(&format!("Running `{}` in {}", command, cwd.display()));
    tracing::info!("Handing off to '{}' in {}", command, cwd.display());

    let options = RunOptions::default()
        .in_dir(cwd)
        .with_env(LANGUAGE_ENV, language.code())
        .inherited();

    let exit_code = match runner.run(command, &options) {
        Ok(_) => {
            ui.success(&format!("`{}` finished", command));
            Some(0)
        }
        Err(failure) => {
            ui.error(&format!("`{}` failed: {}", command, failure.summary()));
            failure.exit_code
        }
    };

    HandoffResult {
        command: command.to_string(),
        exit_code,
    }
}
