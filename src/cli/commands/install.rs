//! Install command implementation.
//!
//! The `ricsi install` command (also the default) runs the install pipeline
//! and prints a short summary of what happened.

use crate::config::InstallerConfig;
use crate::error::Result;
use crate::repository::AcquisitionOutcome;
use crate::runner::{InstallPipeline, PipelineReport};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The install command implementation.
pub struct InstallCommand<'a> {
    config: InstallerConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(config: InstallerConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    fn summarize(&self, report: &PipelineReport, ui: &mut dyn UserInterface) {
        let repository = match &report.acquisition.outcome {
            AcquisitionOutcome::Cloned => "cloned".to_string(),
            AcquisitionOutcome::CloneFailed { message } => format!("clone failed ({})", message),
            AcquisitionOutcome::Verified(method) => format!("verified by {}", method),
            AcquisitionOutcome::Kept => "kept as is".to_string(),
        };
        let handoff = match report.handoff.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "did not run to completion".to_string(),
        };

        ui.message("");
        ui.message(&format!("  Network:    {}", report.network.class));
        ui.message(&format!("  Source:     {}", report.source.url));
        ui.message(&format!(
            "  Repository: {} ({})",
            report.acquisition.destination.display(),
            repository
        ));
        ui.message(&format!("  Hand-off:   {}", handoff));
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = InstallPipeline::new(&self.config, self.runner).run(ui)?;
        self.summarize(&report, ui);

        // The hand-off's exit code is reported, not propagated.
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use crate::state::Language;
    use crate::ui::{MockUI, Tone};
    use tempfile::TempDir;

    #[test]
    fn failed_handoff_still_succeeds() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::new(temp.path()).with_language(Language::En);
        let runner = ScriptedRunner::new()
            .succeed("node -v", "v20.11.0")
            .succeed("pnpm --version", "9.1.0")
            .succeed("npm --version", "10.2.4")
            .fail("ping", 1, "timeout")
            .succeed("git clone", "")
            .fail("pnpm install", 2, "boom");
        let mut ui = MockUI::new();

        let result = InstallCommand::new(config, &runner).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, 0);
        assert!(ui.shows(Tone::Info, "exit code 2"));
        assert!(ui.shows(Tone::Info, "domestic"));
        assert!(ui.shows(Tone::Info, "cloned"));
    }

    #[test]
    fn missing_runtime_is_an_error() {
        let temp = TempDir::new().unwrap();
        let config = InstallerConfig::new(temp.path()).with_language(Language::En);
        let runner = ScriptedRunner::new();
        let mut ui = MockUI::new();

        assert!(InstallCommand::new(config, &runner).execute(&mut ui).is_err());
        assert!(ui.shows_hint("nodejs.org"));
    }
}
