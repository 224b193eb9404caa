//! Runtime and package-manager detection.
//!
//! This module checks whether the tools the installed project needs are
//! present, and offers to install missing package managers.
//!
//! # Modules
//!
//! - [`tool`] - Tool requirement definitions and version extraction
//! - [`probe`] - The sequential environment check

pub mod probe;
pub mod tool;

pub use probe::{EnvironmentProbe, EnvironmentReport, Resolution, ToolReport, ToolStatus};
pub use tool::{extract_version, node_runtime, package_managers, ToolRequirement};
