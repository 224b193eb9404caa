//! Clone-or-reuse decisions for the destination directory.
//!
//! The acquirer walks a small state machine: each [`AcquisitionDecision`]
//! either finishes acquisition or names the next decision. Every decision
//! taken is recorded in the report, in order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{InstallerError, Result};
use crate::network::SelectedSource;
use crate::shell::{quote_arg, CommandRunner, RunOptions};
use crate::ui::{confirm, Tone, UserInterface};

use super::integrity::{IntegrityChecker, IntegrityMethod, IntegrityVerdict};

/// Prompt key for deleting an existing destination up front.
pub const DELETE_AND_RECLONE_KEY: &str = "delete_and_reclone";

/// Prompt key for verifying an existing destination.
pub const CHECK_INTEGRITY_KEY: &str = "check_integrity";

/// Installed dependencies are hashed too, which can take very long.
const CHECK_INTEGRITY_QUESTION: &str = "Check the existing copy for integrity? \
     (Skip this if dependencies are already installed: hashing node_modules can take a very long time)";

/// Prompt key for re-cloning after a failed verification.
pub const RECLONE_AFTER_CHECK_KEY: &str = "reclone_after_check";

/// One step of the acquisition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionDecision {
    CloneFresh,
    ReuseExisting,
    DeleteAndReclone,
    VerifyExisting,
    Abort,
}

impl fmt::Display for AcquisitionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AcquisitionDecision::CloneFresh => "clone",
            AcquisitionDecision::ReuseExisting => "reuse existing",
            AcquisitionDecision::DeleteAndReclone => "delete and re-clone",
            AcquisitionDecision::VerifyExisting => "verify existing",
            AcquisitionDecision::Abort => "abort",
        };
        write!(f, "{}", label)
    }
}

/// How acquisition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// A fresh clone succeeded.
    Cloned,
    /// The clone command failed. Acquisition still counts as finished.
    CloneFailed { message: String },
    /// The existing tree passed verification.
    Verified(IntegrityMethod),
    /// The existing tree was left as it is.
    Kept,
}

/// Result of acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionReport {
    pub destination: PathBuf,
    /// Decisions in the order they were taken.
    pub decisions: Vec<AcquisitionDecision>,
    pub outcome: AcquisitionOutcome,
}

/// What follows an integrity check.
enum AfterCheck {
    Passed(IntegrityMethod),
    Reclone,
    Keep,
}

/// Obtains the repository at a destination path.
pub struct RepositoryAcquirer<'a> {
    runner: &'a dyn CommandRunner,
    checker: IntegrityChecker,
}

impl<'a> RepositoryAcquirer<'a> {
    pub fn new(runner: &'a dyn CommandRunner, checker: IntegrityChecker) -> Self {
        Self { runner, checker }
    }

    /// Clone, reuse, verify or replace the repository at `destination`.
    ///
    /// Fails only with [`InstallerError::DestinationExists`] (a clone would
    /// overwrite something that could not be removed) or when a prompt
    /// cannot be answered.
    pub fn acquire(
        &self,
        source: &SelectedSource,
        destination: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<AcquisitionReport> {
        let mut decisions = Vec::new();
        let mut decision = self.initial_decision(destination, ui)?;

        let outcome = loop {
            tracing::info!("Acquisition decision: {}", decision);
            decisions.push(decision);

            decision = match decision {
                AcquisitionDecision::CloneFresh => {
                    if destination.exists() {
                        AcquisitionDecision::Abort
                    } else {
                        break self.clone_into(source, destination, ui);
                    }
                }
                AcquisitionDecision::DeleteAndReclone => {
                    self.remove(destination, ui);
                    AcquisitionDecision::CloneFresh
                }
                AcquisitionDecision::VerifyExisting => match self.verify(destination, ui)? {
                    AfterCheck::Passed(method) => break AcquisitionOutcome::Verified(method),
                    AfterCheck::Reclone => AcquisitionDecision::DeleteAndReclone,
                    AfterCheck::Keep => AcquisitionDecision::ReuseExisting,
                },
                AcquisitionDecision::ReuseExisting => {
                    ui.message(&format!("Using existing {}", destination.display()));
                    break AcquisitionOutcome::Kept;
                }
                AcquisitionDecision::Abort => {
                    ui.error(&format!(
                        "{} already exists and was not removed",
                        destination.display()
                    ));
                    return Err(InstallerError::DestinationExists {
                        path: destination.to_path_buf(),
                    });
                }
            };
        };

        Ok(AcquisitionReport {
            destination: destination.to_path_buf(),
            decisions,
            outcome,
        })
    }

    fn initial_decision(
        &self,
        destination: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<AcquisitionDecision> {
        if !destination.exists() {
            return Ok(AcquisitionDecision::CloneFresh);
        }

        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| destination.display().to_string());
        ui.warning(&format!("{} already exists", name));

        if confirm(
            ui,
            DELETE_AND_RECLONE_KEY,
            &format!("Delete {} and clone it again?", name),
            false,
        )? {
            return Ok(AcquisitionDecision::DeleteAndReclone);
        }

        if confirm(ui, CHECK_INTEGRITY_KEY, CHECK_INTEGRITY_QUESTION, true)? {
            Ok(AcquisitionDecision::VerifyExisting)
        } else {
            Ok(AcquisitionDecision::ReuseExisting)
        }
    }

    fn verify(&self, destination: &Path, ui: &mut dyn UserInterface) -> Result<AfterCheck> {
        let mut task = ui.begin("Checking repository integrity...");

        match self.checker.verify(destination) {
            IntegrityVerdict::Pass(method) => {
                task.finish(Tone::Success, &format!("Repository integrity confirmed by {}", method));
                Ok(AfterCheck::Passed(method))
            }
            IntegrityVerdict::Fail(failure) => {
                task.finish(Tone::Warning, "Repository may be incomplete");
                tracing::warn!("Integrity check failed: {}", failure);

                let reclone = confirm(
                    ui,
                    RECLONE_AFTER_CHECK_KEY,
                    "Delete the current copy and clone it again?",
                    false,
                )?;
                Ok(if reclone {
                    AfterCheck::Reclone
                } else {
                    AfterCheck::Keep
                })
            }
        }
    }

    fn remove(&self, destination: &Path, ui: &mut dyn UserInterface) {
        tracing::info!("Removing {}", destination.display());
        if let Err(e) = fs::remove_dir_all(destination) {
            tracing::warn!("Could not remove {}: {}", destination.display(), e);
            ui.warning(&format!("Could not remove {}: {}", destination.display(), e));
        }
    }

    fn clone_into(
        &self,
        source: &SelectedSource,
        destination: &Path,
        ui: &mut dyn UserInterface,
    ) -> AcquisitionOutcome {
        let command = format!(
            "git clone {} {}",
            source.url,
            quote_arg(&destination.to_string_lossy())
        );
        let mut task = ui.begin(&format!("Cloning from {}...", source.url));

        match self.runner.run(&command, &RunOptions::default()) {
            Ok(_) => {
                task.finish(Tone::Success, "Repository cloned");
                AcquisitionOutcome::Cloned
            }
            Err(failure) => {
                let message = failure.summary();
                task.finish(Tone::Error, &format!("Clone failed: {}", message));
                AcquisitionOutcome::CloneFailed { message }
            }
        }
    }
}
