//! ricsi command-line entry point.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use ricsi::cli::{Cli, CommandDispatcher, Commands};
use ricsi::shell::is_ci;
use ricsi::ui::{create_ui, Verbosity};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so `ricsi fingerprint` output stays parseable.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("ricsi=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ricsi=info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Only an install run asks questions, and never under `--yes` or CI.
fn prompts_allowed(cli: &Cli) -> bool {
    matches!(cli.command, None | Some(Commands::Install)) && !cli.yes && !is_ci()
}

/// The directory the repository is cloned into.
fn resolve_base_dir(dir: Option<&Path>) -> io::Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);
    tracing::debug!("Parsed arguments: {:?}", cli);

    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };
    let mut ui = create_ui(prompts_allowed(&cli), verbosity, !cli.no_color);

    let base_dir = match resolve_base_dir(cli.dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            ui.error(&format!("Cannot determine the working directory: {}", e));
            return ExitCode::FAILURE;
        }
    };

    match CommandDispatcher::new(base_dir).dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
