//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Install options are global so
//! they work both with and without the `install` subcommand.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::state::Language;

/// ricsi - Environment-aware project installer.
#[derive(Debug, Parser)]
#[command(name = "ricsi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory the repository is cloned into (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Path to the preferences file (defaults to <DIR>/.ricsi.json)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command to run in the repository once it is in place
    #[arg(long, global = true, value_name = "COMMAND")]
    pub handoff: Option<String>,

    /// Interface language, saved for later runs
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,

    /// Expected tree fingerprint, as printed by `ricsi fingerprint`
    #[arg(long, global = true, value_name = "HEX")]
    pub expect_fingerprint: Option<String>,

    /// Answer every prompt with its default
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the environment, fetch the repository and hand off (default)
    Install,

    /// Print the fingerprint, file count and size of a directory tree
    Fingerprint(FingerprintArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `fingerprint` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FingerprintArgs {
    /// Directory to fingerprint
    #[arg(value_name = "DIR")]
    pub path: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_install() {
        let cli = Cli::try_parse_from(["ricsi"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.yes);
    }

    #[test]
    fn install_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ricsi",
            "--lang",
            "zh",
            "install",
            "--handoff",
            "npm run dev",
            "--yes",
        ])
        .unwrap();

        assert!(matches!(cli.command, Some(Commands::Install)));
        assert_eq!(cli.lang, Some(Language::Zh));
        assert_eq!(cli.handoff.as_deref(), Some("npm run dev"));
        assert!(cli.yes);
    }

    #[test]
    fn dir_and_config_paths() {
        let cli =
            Cli::try_parse_from(["ricsi", "--dir", "/opt", "--config", "/etc/r.json"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/opt")));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/r.json")));
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["ricsi", "--lang", "fr"]).is_err());
    }

    #[test]
    fn fingerprint_requires_dir() {
        assert!(Cli::try_parse_from(["ricsi", "fingerprint"]).is_err());

        let cli = Cli::try_parse_from(["ricsi", "fingerprint", "some/tree"]).unwrap();
        match cli.command {
            Some(Commands::Fingerprint(args)) => assert_eq!(args.path, PathBuf::from("some/tree")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn completions_parses_shell() {
        let cli = Cli::try_parse_from(["ricsi", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Bash }))
        ));
    }
}
