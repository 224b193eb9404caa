//! User preferences persistence.
//!
//! This module provides the [`Preferences`] struct holding the chosen
//! interface language, stored as a small JSON file next to the install.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{InstallerError, Result};

/// File name of the preferences file inside the base directory.
pub const PREFERENCES_FILE: &str = ".ricsi.json";

/// Interface language, forwarded to the hand-off stage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Ru,
}

impl Language {
    /// Every supported language, in menu order.
    pub const ALL: [Language; 3] = [Language::En, Language::Zh, Language::Ru];

    /// Short code used in the file and the environment.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ru => "ru",
        }
    }

    /// Name of the language in that language.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "中文",
            Language::Ru => "Русский",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            "ru" => Ok(Language::Ru),
            other => Err(format!("unknown language '{}' (expected en, zh or ru)", other)),
        }
    }
}

/// Saved user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Chosen language; unset until the first run asks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl Preferences {
    /// Default preferences path under a base directory.
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join(PREFERENCES_FILE)
    }

    /// Load preferences from disk. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| InstallerError::PreferencesParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save preferences to disk using atomic write.
    ///
    /// Uses the write-to-temp-then-rename pattern to prevent corruption.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| InstallerError::Other(anyhow::Error::new(e)))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content + "\n")?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
