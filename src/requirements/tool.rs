//! Tool requirement definitions.

use regex::Regex;
use std::sync::OnceLock;

/// A runtime or package manager to probe.
///
/// Whether a missing tool is fatal depends on where the probe uses it, not
/// on the requirement itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    /// Tool name, used in prompts and prompt keys.
    pub name: String,
    /// Command printing the tool's version.
    pub version_command: String,
    /// Command that installs the tool, if one is known.
    pub install_command: Option<String>,
    /// Where to get the tool when it cannot be installed automatically.
    pub install_hint: String,
}

impl ToolRequirement {
    /// Define the base runtime.
    pub fn runtime(name: &str, version_command: &str, install_hint: &str) -> Self {
        Self {
            name: name.to_string(),
            version_command: version_command.to_string(),
            install_command: None,
            install_hint: install_hint.to_string(),
        }
    }

    /// Define a package manager.
    pub fn package_manager(
        name: &str,
        version_command: &str,
        install_command: Option<&str>,
        install_hint: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            version_command: version_command.to_string(),
            install_command: install_command.map(str::to_string),
            install_hint: install_hint.to_string(),
        }
    }

    /// Key for the auto-install prompt.
    pub fn install_prompt_key(&self) -> String {
        format!("install_{}", self.name)
    }
}

/// The runtime the installed project is built on.
pub fn node_runtime() -> ToolRequirement {
    ToolRequirement::runtime(
        "node",
        "node -v",
        "Download and install Node.js from https://nodejs.org/",
    )
}

/// Package managers in priority order.
pub fn package_managers() -> Vec<ToolRequirement> {
    vec![
        ToolRequirement::package_manager(
            "npm",
            "npm --version",
            Some("curl -L https://www.npmjs.com/install.sh | sh"),
            "See https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
        ),
        ToolRequirement::package_manager(
            "pnpm",
            "pnpm --version",
            Some("npm install -g pnpm"),
            "See https://pnpm.io/installation",
        ),
    ]
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.\-]+)?").expect("version regex is valid")
    })
}

/// Extract a semantic version from raw `--version` output.
///
/// Returns the trimmed first line when no version-looking token is found.
pub fn extract_version(output: &str) -> String {
    if let Some(m) = version_pattern().find(output) {
        return m.as_str().to_string();
    }
    output.lines().next().unwrap_or("").trim().to_string()
}
