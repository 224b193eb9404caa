//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning anything.
//! Responses are matched by substring against the command string, in the
//! order rules were added, and every invocation is recorded for assertions.
//!
//! # Example
//!
//! ```
//! use ricsi::shell::{CommandRunner, RunOptions, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new()
//!     .succeed("node -v", "v20.11.0")
//!     .fail("pnpm --version", 127, "pnpm: not found");
//!
//! assert_eq!(runner.run("node -v", &RunOptions::silent()).unwrap(), "v20.11.0");
//! assert!(runner.run("pnpm --version", &RunOptions::silent()).is_err());
//! assert_eq!(runner.count_matching("node"), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

use super::runner::{CommandFailure, CommandRunner, RunOptions, RunOutcome};

/// A canned response.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Exit 0 with this stdout.
    Succeed(String),
    /// Exit with this code and stderr.
    Fail { code: i32, stderr: String },
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    /// The command string.
    pub command: String,
    /// Working directory passed in the options.
    pub cwd: Option<PathBuf>,
    /// Environment passed in the options.
    pub env: HashMap<String, String>,
}

#[derive(Debug)]
struct Rule {
    pattern: String,
    responses: VecDeque<ScriptedResponse>,
}

/// Command runner with canned responses.
///
/// A rule with several queued responses hands them out in order and keeps
/// repeating the last one. Commands no rule matches fail with exit code 127.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<RecordedCommand>>,
}

impl ScriptedRunner {
    /// Create a runner where every command fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `pattern` succeed with `stdout`.
    pub fn succeed(self, pattern: &str, stdout: &str) -> Self {
        self.respond(pattern, vec![ScriptedResponse::Succeed(stdout.to_string())])
    }

    /// Commands containing `pattern` fail with `code` and `stderr`.
    pub fn fail(self, pattern: &str, code: i32, stderr: &str) -> Self {
        self.respond(
            pattern,
            vec![ScriptedResponse::Fail {
                code,
                stderr: stderr.to_string(),
            }],
        )
    }

    /// Commands containing `pattern` receive `responses` in sequence.
    pub fn respond(self, pattern: &str, responses: Vec<ScriptedResponse>) -> Self {
        if let Ok(mut rules) = self.rules.lock() {
            rules.push(Rule {
                pattern: pattern.to_string(),
                responses: responses.into(),
            });
        }
        self
    }

    /// All recorded invocations, in order.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded command strings, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Number of invocations whose command contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.command.contains(pattern))
            .count()
    }

    fn next_response(&self, command: &str) -> Option<ScriptedResponse> {
        let mut rules = self.rules.lock().ok()?;
        let rule = rules.iter_mut().find(|r| command.contains(&r.pattern))?;
        if rule.responses.len() > 1 {
            rule.responses.pop_front()
        } else {
            rule.responses.front().cloned()
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str, options: &RunOptions) -> RunOutcome {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCommand {
                command: command.to_string(),
                cwd: options.cwd.clone(),
                env: options.env.clone(),
            });
        }

        match self.next_response(command) {
            Some(ScriptedResponse::Succeed(stdout)) => Ok(stdout),
            Some(ScriptedResponse::Fail { code, stderr }) => Err(CommandFailure {
                command: command.to_string(),
                exit_code: Some(code),
                stderr,
            }),
            None => Err(CommandFailure {
                command: command.to_string(),
                exit_code: Some(127),
                stderr: format!("{}: not scripted", command),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_commands_fail() {
        let runner = ScriptedRunner::new();
        let failure = runner.run("git clone x", &RunOptions::default()).unwrap_err();
        assert_eq!(failure.exit_code, Some(127));
    }

    #[test]
    fn first_matching_rule_wins() {
        let runner = ScriptedRunner::new()
            .succeed("ping -c 1 -W 1 github.com", "ok")
            .fail("ping", 1, "timeout");

        assert!(runner
            .run("ping -c 1 -W 1 github.com", &RunOptions::silent())
            .is_ok());
        assert!(runner
            .run("ping -c 1 -W 1 google.com", &RunOptions::silent())
            .is_err());
    }

    #[test]
    fn queued_responses_repeat_last() {
        let runner = ScriptedRunner::new().respond(
            "pnpm --version",
            vec![
                ScriptedResponse::Fail {
                    code: 127,
                    stderr: "not found".into(),
                },
                ScriptedResponse::Succeed("9.1.0".into()),
            ],
        );

        let opts = RunOptions::silent();
        assert!(runner.run("pnpm --version", &opts).is_err());
        assert_eq!(runner.run("pnpm --version", &opts).unwrap(), "9.1.0");
        assert_eq!(runner.run("pnpm --version", &opts).unwrap(), "9.1.0");
    }

    #[test]
    fn records_cwd_and_env() {
        let runner = ScriptedRunner::new().succeed("pnpm install", "");
        let opts = RunOptions::default()
            .in_dir("/work/repo")
            .with_env("RICSI_LANG", "zh");
        runner.run("pnpm install", &opts).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].cwd, Some(PathBuf::from("/work/repo")));
        assert_eq!(calls[0].env.get("RICSI_LANG").map(String::as_str), Some("zh"));
    }
}
