//! User-facing output and questions.
//!
//! The installer talks to the user through [`UserInterface`]: toned status
//! lines, indented hints, a header, [`Task`] handles for slow steps, and
//! [`Question`]s. Three front ends implement it:
//! - [`TerminalUI`] for a person at a TTY (`dialoguer`, `indicatif`)
//! - [`HeadlessUI`] for `--yes` and CI, answering from `RICSI_PROMPT_<KEY>`
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use ricsi::ui::{create_ui, Verbosity};
//!
//! let mut ui = create_ui(false, Verbosity::Quiet, false);
//! ui.header("ricsi installer");
//! ui.success("Repository cloned");
//! ```

pub mod headless;
pub mod mock;
pub mod question;
pub mod style;
pub mod terminal;

pub use headless::{HeadlessUI, ANSWER_ENV_PREFIX};
pub use mock::MockUI;
pub use question::{confirm, pick, Answer, Choice, Question, QuestionKind};
pub use style::Palette;
pub use terminal::TerminalUI;

use crate::error::Result;

/// How a status line reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    /// Leading glyph; plain information has none.
    pub fn icon(self) -> Option<&'static str> {
        match self {
            Tone::Info => None,
            Tone::Success => Some("✓"),
            Tone::Warning => Some("⚠"),
            Tone::Error => Some("✗"),
        }
    }
}

/// How much the installer prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    /// Drop informational lines and the header; keep outcomes and hints.
    Quiet,
}

impl Verbosity {
    pub fn shows(self, tone: Tone) -> bool {
        self == Verbosity::Normal || tone != Tone::Info
    }
}

/// Everything the installer shows or asks.
pub trait UserInterface {
    /// Print a status line.
    fn say(&mut self, tone: Tone, msg: &str);

    /// Print guidance under the previous line.
    fn hint(&mut self, hint: &str);

    fn header(&mut self, title: &str);

    /// Start a slow step. The handle prints how it ended.
    fn begin(&mut self, activity: &str) -> Box<dyn Task>;

    fn ask(&mut self, question: &Question) -> Result<Answer>;

    /// Whether a person is answering the questions.
    fn is_interactive(&self) -> bool;

    fn message(&mut self, msg: &str) {
        self.say(Tone::Info, msg);
    }

    fn success(&mut self, msg: &str) {
        self.say(Tone::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.say(Tone::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.say(Tone::Error, msg);
    }
}

/// A step started with [`UserInterface::begin`].
pub trait Task {
    /// Replace the activity line with the outcome.
    fn finish(&mut self, tone: Tone, msg: &str);
}

/// Pick the front end: the terminal UI when prompts are allowed and stdout
/// is a TTY, otherwise the headless one.
pub fn create_ui(prompts: bool, verbosity: Verbosity, colors: bool) -> Box<dyn UserInterface> {
    if prompts && console::Term::stdout().is_term() {
        Box::new(TerminalUI::new(verbosity, colors))
    } else {
        Box::new(HeadlessUI::from_env(verbosity))
    }
}
