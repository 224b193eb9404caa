//! Install pipeline orchestration.
//!
//! Stages run in a fixed order: language, environment, network, source,
//! acquisition, hand-off. Only a missing runtime, an unremovable destination
//! or an unanswerable prompt stop the run; every other failure is recorded
//! in the report and the pipeline moves on.

use crate::config::InstallerConfig;
use crate::error::Result;
use crate::network::{NetworkAssessment, NetworkClassifier, SelectedSource};
use crate::repository::{AcquisitionReport, IntegrityChecker, RepositoryAcquirer};
use crate::requirements::{EnvironmentProbe, EnvironmentReport};
use crate::shell::CommandRunner;
use crate::state::{Language, Preferences};
use crate::ui::{pick, Choice, Question, Tone, UserInterface};

use super::handoff::{run_handoff, HandoffResult};

/// Prompt key for the language menu.
pub const LANGUAGE_KEY: &str = "language";

/// Everything a completed run decided and did.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub language: Language,
    pub environment: EnvironmentReport,
    pub network: NetworkAssessment,
    pub source: SelectedSource,
    pub acquisition: AcquisitionReport,
    pub handoff: HandoffResult,
}

/// Drives one install run.
pub struct InstallPipeline<'a> {
    config: &'a InstallerConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> InstallPipeline<'a> {
    pub fn new(config: &'a InstallerConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Run every stage.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<PipelineReport> {
        let language = self.resolve_language(ui)?;

        ui.header("ricsi installer");

        let environment = EnvironmentProbe::new(
            self.runner,
            self.config.runtime.clone(),
            self.config.package_managers.clone(),
        )
        .run(ui)?;

        let network = self.classify_network(ui);

        let source = self.config.source.select(network.class);
        let destination = self.config.destination(&source);
        ui.message(&format!("Repository source: {}", source.url));

        let acquisition = RepositoryAcquirer::new(
            self.runner,
            IntegrityChecker::new(self.config.expectation.clone()),
        )
        .acquire(&source, &destination, ui)?;

        let handoff = run_handoff(
            self.runner,
            &self.config.handoff_command,
            &acquisition.destination,
            language,
            ui,
        );

        Ok(PipelineReport {
            language,
            environment,
            network,
            source,
            acquisition,
            handoff,
        })
    }

    fn classify_network(&self, ui: &mut dyn UserInterface) -> NetworkAssessment {
        let mut task = ui.begin("Checking network environment...");

        let assessment = NetworkClassifier::with_hosts(
            self.runner,
            &self.config.reference_hosts,
            &self.config.discriminating_hosts,
        )
        .assess();

        task.finish(Tone::Success, &format!("Network environment: {}", assessment.class));
        assessment
    }

    /// Command-line choice, then the saved preference, then a prompt.
    ///
    /// Explicit and interactive choices are saved. Preference file problems
    /// are logged and never stop the run.
    fn resolve_language(&self, ui: &mut dyn UserInterface) -> Result<Language> {
        let path = &self.config.preferences_path;

        let saved = match Preferences::load(path) {
            Ok(prefs) => prefs.language,
            Err(e) => {
                tracing::warn!("Ignoring preferences: {}", e);
                None
            }
        };

        let (language, persist) = match (self.config.language, saved) {
            (Some(forced), saved) => (forced, saved != Some(forced)),
            (None, Some(saved)) => (saved, false),
            (None, None) => (self.ask_language(ui)?, ui.is_interactive()),
        };

        if persist {
            let prefs = Preferences {
                language: Some(language),
            };
            match prefs.save(path) {
                Ok(()) => tracing::debug!("Saved language {} to {}", language, path.display()),
                Err(e) => tracing::warn!("Could not save preferences to {}: {}", path.display(), e),
            }
        }

        tracing::info!("Language: {}", language);
        Ok(language)
    }

    fn ask_language(&self, ui: &mut dyn UserInterface) -> Result<Language> {
        let choices = Language::ALL
            .iter()
            .map(|l| Choice::new(l.label(), l.code()))
            .collect();
        let question = Question::pick(
            LANGUAGE_KEY,
            "Choose a language",
            choices,
            Language::default().code(),
        );

        let answer = pick(ui, &question)?;
        Ok(answer.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, using {}", e, Language::default());
            Language::default()
        }))
    }
}
