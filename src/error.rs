//! Error types for installer operations.
//!
//! This module defines [`InstallerError`], the primary error type used
//! throughout the installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Only a handful of conditions are fatal: a missing base runtime and a
//!   clone destination that appeared underneath us.
//! - Recoverable conditions (missing package manager, unreachable host,
//!   failed clone, integrity mismatch) are reported as outcomes, not errors.
//! - Use `anyhow::Error` (via `InstallerError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// A prerequisite the installer cannot run without is absent.
    #[error("Missing prerequisite '{tool}': {hint}")]
    PrerequisiteMissing { tool: String, hint: String },

    /// The clone destination exists although it was expected to be absent.
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A prompt needed an answer but none could be obtained.
    #[error("Cannot answer prompt '{key}' without a terminal")]
    PromptUnavailable { key: String },

    /// The preferences file could not be parsed.
    #[error("Failed to parse preferences at {path}: {message}")]
    PreferencesParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallerError {
    /// Whether this error should stop the pipeline.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PrerequisiteMissing { .. } | Self::DestinationExists { .. }
        )
    }
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerequisite_missing_displays_tool_and_hint() {
        let err = InstallerError::PrerequisiteMissing {
            tool: "node".into(),
            hint: "install from https://nodejs.org/".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("node"));
        assert!(msg.contains("nodejs.org"));
    }

    #[test]
    fn destination_exists_displays_path() {
        let err = InstallerError::DestinationExists {
            path: PathBuf::from("/work/wuhu-home-Caidan"),
        };
        assert!(err.to_string().contains("/work/wuhu-home-Caidan"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = InstallerError::CommandFailed {
            command: "git clone x".into(),
            code: Some(128),
            stderr: "fatal".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("git clone x"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn only_runtime_and_destination_errors_are_fatal() {
        assert!(InstallerError::PrerequisiteMissing {
            tool: "node".into(),
            hint: String::new(),
        }
        .is_fatal());
        assert!(InstallerError::DestinationExists {
            path: PathBuf::from("x"),
        }
        .is_fatal());
        assert!(!InstallerError::PromptUnavailable { key: "k".into() }.is_fatal());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: InstallerError = io_err.into();
        assert!(matches!(err, InstallerError::Io(_)));
    }
}
