//! Platform-specific shell details.

/// Target families that need different command syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// Linux and other Unix-like systems.
    Unix,
    /// macOS; BSD userland, otherwise Unix.
    MacOs,
    /// Windows.
    Windows,
}

impl PlatformKind {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            PlatformKind::Windows
        } else if cfg!(target_os = "macos") {
            PlatformKind::MacOs
        } else {
            PlatformKind::Unix
        }
    }
}

/// Shell used to run command strings.
pub fn shell_program() -> &'static str {
    match PlatformKind::current() {
        PlatformKind::Windows => "cmd.exe",
        PlatformKind::Unix | PlatformKind::MacOs => "sh",
    }
}

/// Flag that passes a command string to [`shell_program`].
pub fn shell_flag() -> &'static str {
    match PlatformKind::current() {
        PlatformKind::Windows => "/C",
        PlatformKind::Unix | PlatformKind::MacOs => "-c",
    }
}

/// Quote a path or argument for inclusion in a shell command string.
pub fn quote_arg(arg: &str) -> String {
    match PlatformKind::current() {
        PlatformKind::Windows => format!("\"{}\"", arg),
        PlatformKind::Unix | PlatformKind::MacOs => {
            format!("'{}'", arg.replace('\'', r"'\''"))
        }
    }
}

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
