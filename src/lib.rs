//! ricsi - Environment-aware project installer.
//!
//! ricsi checks for the runtime and package managers a project needs,
//! classifies the network to pick a clone source, fetches (or verifies) the
//! repository, and hands off to the project's own install command.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Bundled installer settings
//! - [`error`] - Error types and result aliases
//! - [`network`] - Reachability probes and source selection
//! - [`repository`] - Clone decisions and integrity verification
//! - [`requirements`] - Runtime and package-manager detection
//! - [`runner`] - Install pipeline orchestration and hand-off
//! - [`shell`] - Shell command execution
//! - [`state`] - Persisted preferences
//! - [`ui`] - Status lines, activity spinners, and questions
//!
//! # Example
//!
//! ```
//! use ricsi::network::{NetworkClass, RepositorySource};
//! use std::path::Path;
//!
//! let source = RepositorySource::default().select(NetworkClass::Domestic);
//! assert!(source.url.starts_with("https://githubfast.com/"));
//! assert!(source.destination(Path::new("/work")).ends_with("wuhu-home-Caidan"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod network;
pub mod repository;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod state;
pub mod ui;

pub use error::{InstallerError, Result};
