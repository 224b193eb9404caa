//! Installer settings.

use std::path::{Path, PathBuf};

use crate::network::{RepositorySource, SelectedSource, DISCRIMINATING_HOSTS, REFERENCE_HOSTS};
use crate::repository::IntegrityExpectation;
use crate::requirements::{node_runtime, package_managers, ToolRequirement};
use crate::state::{Language, Preferences};

/// Command run in the destination once acquisition finishes.
pub const DEFAULT_HANDOFF: &str = "pnpm install";

/// Environment variable carrying the chosen language to the hand-off stage.
pub const LANGUAGE_ENV: &str = "RICSI_LANG";

/// Everything one install run needs to know.
///
/// Built from bundled defaults, then adjusted by command-line flags.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Directory the repository is cloned into.
    pub base_dir: PathBuf,
    /// Runtime whose absence halts the run.
    pub runtime: ToolRequirement,
    /// Package managers, in priority order.
    pub package_managers: Vec<ToolRequirement>,
    /// Hosts probed during network classification.
    pub reference_hosts: Vec<String>,
    /// Hosts that must all answer for the network to count as international.
    pub discriminating_hosts: Vec<String>,
    pub source: RepositorySource,
    pub expectation: IntegrityExpectation,
    pub handoff_command: String,
    pub preferences_path: PathBuf,
    /// Language forced from the command line.
    pub language: Option<Language>,
}

impl InstallerConfig {
    /// Bundled defaults rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            preferences_path: Preferences::default_path(&base_dir),
            base_dir,
            runtime: node_runtime(),
            package_managers: package_managers(),
            reference_hosts: REFERENCE_HOSTS.iter().map(|h| h.to_string()).collect(),
            discriminating_hosts: DISCRIMINATING_HOSTS.iter().map(|h| h.to_string()).collect(),
            source: RepositorySource::default(),
            expectation: IntegrityExpectation::default(),
            handoff_command: DEFAULT_HANDOFF.to_string(),
            language: None,
        }
    }

    pub fn with_handoff(mut self, command: impl Into<String>) -> Self {
        self.handoff_command = command.into();
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = path.into();
        self
    }

    pub fn with_expected_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.expectation = self.expectation.with_fingerprint(fingerprint);
        self
    }

    /// Where the selected repository lives.
    pub fn destination(&self, selected: &SelectedSource) -> PathBuf {
        selected.destination(&self.base_dir)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkClass;

    #[test]
    fn defaults_match_bundled_values() {
        let config = InstallerConfig::new("/work");

        assert_eq!(config.handoff_command, "pnpm install");
        assert_eq!(config.runtime.name, "node");
        assert_eq!(config.reference_hosts.len(), 4);
        assert_eq!(config.discriminating_hosts, vec!["github.com", "google.com"]);
        assert_eq!(config.preferences_path, PathBuf::from("/work/.ricsi.json"));
        assert!(config.language.is_none());
    }

    #[test]
    fn destination_is_under_base_dir() {
        let config = InstallerConfig::new("/work");
        let selected = config.source.select(NetworkClass::International);
        assert_eq!(
            config.destination(&selected),
            PathBuf::from("/work/wuhu-home-Caidan")
        );
    }

    #[test]
    fn builders_override_defaults() {
        let config = InstallerConfig::new("/work")
            .with_handoff("npm run dev")
            .with_language(Language::Ru)
            .with_preferences_path("/etc/ricsi.json")
            .with_expected_fingerprint("abc");

        assert_eq!(config.handoff_command, "npm run dev");
        assert_eq!(config.language, Some(Language::Ru));
        assert_eq!(config.preferences_path, PathBuf::from("/etc/ricsi.json"));
        assert_eq!(config.expectation.fingerprint.as_deref(), Some("abc"));
    }
}
