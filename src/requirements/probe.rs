//! Environment probe for the runtime and package managers.
//!
//! The runtime is checked first and is a hard gate: without it nothing the
//! installer hands off to can run. Package managers are advisory. A missing
//! one is offered for auto-install once, re-probed once, and the pipeline
//! proceeds whatever the outcome.
//!
//! # Example
//!
//! ```
//! use ricsi::requirements::{node_runtime, package_managers, EnvironmentProbe};
//! use ricsi::shell::ScriptedRunner;
//! use ricsi::ui::MockUI;
//!
//! let runner = ScriptedRunner::new()
//!     .succeed("node -v", "v20.11.1")
//!     .succeed("pnpm --version", "9.1.0")
//!     .succeed("npm --version", "10.2.4");
//! let probe = EnvironmentProbe::new(&runner, node_runtime(), package_managers());
//!
//! let mut ui = MockUI::new();
//! let report = probe.run(&mut ui).unwrap();
//! assert_eq!(report.runtime_version, "20.11.1");
//! assert!(report.tools.iter().all(|t| t.status.is_detected()));
//! ```

use crate::error::{InstallerError, Result};
use crate::shell::{CommandRunner, RunOptions};
use crate::ui::{confirm, Tone, UserInterface};

use super::tool::{extract_version, ToolRequirement};

/// Whether a tool answered its version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The version command succeeded.
    Detected { version: String },
    /// The version command failed or could not start.
    NotDetected,
}

impl ToolStatus {
    /// Whether the tool was found.
    pub fn is_detected(&self) -> bool {
        matches!(self, ToolStatus::Detected { .. })
    }
}

/// How a package-manager check concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Found on the first check.
    AlreadyPresent,
    /// Missing, installed, and found on the re-check.
    Installed,
    /// Missing and the user declined the install.
    Declined,
    /// Missing and no install command is known.
    NoInstaller,
    /// The install command failed.
    InstallFailed { message: String },
    /// The install command succeeded but the re-check still failed.
    StillMissing,
}

/// Result of checking one package manager.
#[derive(Debug, Clone)]
pub struct ToolReport {
    /// Tool name.
    pub tool: String,
    /// Final status after any install attempt.
    pub status: ToolStatus,
    /// How the check concluded.
    pub resolution: Resolution,
}

/// Result of the whole environment check.
#[derive(Debug, Clone)]
pub struct EnvironmentReport {
    /// Detected runtime version.
    pub runtime_version: String,
    /// Package manager reports, in priority order.
    pub tools: Vec<ToolReport>,
}

/// Checks the runtime and package managers through a [`CommandRunner`].
pub struct EnvironmentProbe<'a> {
    runner: &'a dyn CommandRunner,
    runtime: ToolRequirement,
    package_managers: Vec<ToolRequirement>,
}

impl<'a> EnvironmentProbe<'a> {
    /// Create a probe for a runtime and package managers in priority order.
    pub fn new(
        runner: &'a dyn CommandRunner,
        runtime: ToolRequirement,
        package_managers: Vec<ToolRequirement>,
    ) -> Self {
        Self {
            runner,
            runtime,
            package_managers,
        }
    }

    /// Run a tool's version check.
    pub fn probe(&self, tool: &ToolRequirement) -> ToolStatus {
        match self.runner.run(&tool.version_command, &RunOptions::silent()) {
            Ok(output) => ToolStatus::Detected {
                version: extract_version(&output),
            },
            Err(failure) => {
                tracing::debug!("{} not detected: {}", tool.name, failure.summary());
                ToolStatus::NotDetected
            }
        }
    }

    /// Check the runtime, then every package manager in order.
    ///
    /// Only a missing runtime is an error.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<EnvironmentReport> {
        let runtime_version = self.check_runtime(ui)?;

        let mut tools = Vec::with_capacity(self.package_managers.len());
        for tool in &self.package_managers {
            tools.push(self.check_package_manager(tool, ui)?);
        }

        Ok(EnvironmentReport {
            runtime_version,
            tools,
        })
    }

    /// Check the base runtime; absent is fatal.
    pub fn check_runtime(&self, ui: &mut dyn UserInterface) -> Result<String> {
        let tool = &self.runtime;
        let mut task = ui.begin(&format!("Checking {} environment...", tool.name));

        match self.probe(tool) {
            ToolStatus::Detected { version } => {
                task.finish(Tone::Success, &format!("Detected {} {}", tool.name, version));
                tracing::info!("{} {} detected", tool.name, version);
                Ok(version)
            }
            ToolStatus::NotDetected => {
                task.finish(Tone::Error, &format!("{} was not found", tool.name));
                ui.hint(&tool.install_hint);
                Err(InstallerError::PrerequisiteMissing {
                    tool: tool.name.clone(),
                    hint: tool.install_hint.clone(),
                })
            }
        }
    }

    /// Check one package manager, offering a single auto-install attempt.
    pub fn check_package_manager(
        &self,
        tool: &ToolRequirement,
        ui: &mut dyn UserInterface,
    ) -> Result<ToolReport> {
        let mut task = ui.begin(&format!("Checking {}...", tool.name));

        if let ToolStatus::Detected { version } = self.probe(tool) {
            task.finish(Tone::Success, &format!("Detected {} {}", tool.name, version));
            return Ok(ToolReport {
                tool: tool.name.clone(),
                status: ToolStatus::Detected { version },
                resolution: Resolution::AlreadyPresent,
            });
        }
        task.finish(Tone::Warning, &format!("{} was not found", tool.name));

        let Some(install_command) = tool.install_command.as_deref() else {
            ui.hint(&tool.install_hint);
            return Ok(Self::missing(tool, Resolution::NoInstaller));
        };

        let question = format!("{} was not found. Try to install it automatically?", tool.name);
        if !confirm(ui, &tool.install_prompt_key(), &question, true)? {
            ui.warning(&format!("Please install {} manually.", tool.name));
            ui.hint(&tool.install_hint);
            return Ok(Self::missing(tool, Resolution::Declined));
        }

        let mut task = ui.begin(&format!("Installing {}...", tool.name));
        if let Err(failure) = self.runner.run(install_command, &RunOptions::default()) {
            task.finish(
                Tone::Error,
                &format!("Installing {} failed, please install it manually", tool.name),
            );
            ui.hint(&tool.install_hint);
            return Ok(Self::missing(
                tool,
                Resolution::InstallFailed {
                    message: failure.summary(),
                },
            ));
        }

        match self.probe(tool) {
            ToolStatus::Detected { version } => {
                task.finish(Tone::Success, &format!("Installed {} {}", tool.name, version));
                tracing::info!("{} {} installed", tool.name, version);
                Ok(ToolReport {
                    tool: tool.name.clone(),
                    status: ToolStatus::Detected { version },
                    resolution: Resolution::Installed,
                })
            }
            ToolStatus::NotDetected => {
                task.finish(
                    Tone::Warning,
                    &format!("{} installed but still not found on PATH", tool.name),
                );
                ui.hint(&tool.install_hint);
                Ok(Self::missing(tool, Resolution::StillMissing))
            }
        }
    }

    fn missing(tool: &ToolRequirement, resolution: Resolution) -> ToolReport {
        tracing::warn!("Continuing without {} ({:?})", tool.name, resolution);
        ToolReport {
            tool: tool.name.clone(),
            status: ToolStatus::NotDetected,
            resolution,
        }
    }
}
