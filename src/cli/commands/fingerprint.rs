//! Fingerprint command implementation.
//!
//! The `ricsi fingerprint <DIR>` command prints the values the integrity
//! check compares against, so the expected fingerprint can be refreshed
//! from a known-good clone.

use anyhow::Context;

use crate::cli::args::FingerprintArgs;
use crate::error::Result;
use crate::repository::{
    check_stats, fingerprint, tree_stats, IntegrityExpectation, BUNDLED_FINGERPRINT,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The fingerprint command implementation.
pub struct FingerprintCommand {
    args: FingerprintArgs,
}

impl FingerprintCommand {
    /// Create a new fingerprint command.
    pub fn new(args: FingerprintArgs) -> Self {
        Self { args }
    }
}

impl Command for FingerprintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = &self.args.path;
        if !path.is_dir() {
            ui.error(&format!("{} is not a directory", path.display()));
            return Ok(CommandResult::failure(2));
        }

        let digest = fingerprint(path)
            .with_context(|| format!("failed to fingerprint {}", path.display()))?;
        let stats = tree_stats(path)
            .with_context(|| format!("failed to measure {}", path.display()))?;

        println!("fingerprint: {}", digest);
        println!("files: {}", stats.file_count);
        println!("bytes: {}", stats.total_size);

        if digest == BUNDLED_FINGERPRINT {
            ui.success("Fingerprint matches the bundled one");
        } else {
            ui.message("Fingerprint differs from the bundled one");
        }
        if check_stats(stats, &IntegrityExpectation::default()) {
            ui.success("Size and file count are within the bundled bounds");
        } else {
            ui.warning("Size and file count are outside the bundled bounds");
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, Tone};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn small_tree_is_outside_bounds() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "hello").unwrap();
        let mut ui = MockUI::new();

        let result = FingerprintCommand::new(FingerprintArgs {
            path: temp.path().to_path_buf(),
        })
        .execute(&mut ui)
        .unwrap();

        assert!(result.success);
        assert!(ui.shows(Tone::Info, "differs from the bundled"));
        assert!(ui.shows(Tone::Warning, "outside"));
    }

    #[test]
    fn missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = FingerprintCommand::new(FingerprintArgs {
            path: temp.path().join("absent"),
        })
        .execute(&mut ui)
        .unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.shows(Tone::Error, "not a directory"));
    }
}
