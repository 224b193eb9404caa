//! Installer configuration.
//!
//! Settings come from bundled defaults in [`installer`], adjusted by
//! command-line flags. The only persisted setting is the language, kept in
//! [`crate::state::Preferences`].

pub mod installer;

pub use installer::{InstallerConfig, DEFAULT_HANDOFF, LANGUAGE_ENV};
