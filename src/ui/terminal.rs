//! Front end for a person at a terminal.

use std::io::Write;
use std::time::Duration;

use console::Term;
use dialoguer::{Confirm, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{InstallerError, Result};

use super::{Answer, Palette, Question, QuestionKind, Task, Tone, UserInterface, Verbosity};

pub struct TerminalUI {
    term: Term,
    palette: Palette,
    verbosity: Verbosity,
}

impl TerminalUI {
    pub fn new(verbosity: Verbosity, colors: bool) -> Self {
        Self {
            term: Term::stdout(),
            palette: Palette::for_terminal(colors),
            verbosity,
        }
    }

    fn print(&mut self, line: &str) {
        writeln!(self.term, "{}", line).ok();
    }
}

impl UserInterface for TerminalUI {
    fn say(&mut self, tone: Tone, msg: &str) {
        if self.verbosity.shows(tone) {
            let line = self.palette.line(tone, msg);
            self.print(&line);
        }
    }

    fn hint(&mut self, hint: &str) {
        let line = self.palette.hint(hint);
        self.print(&line);
    }

    fn header(&mut self, title: &str) {
        if self.verbosity == Verbosity::Normal {
            let line = format!("\n{}\n", self.palette.header(title));
            self.print(&line);
        }
    }

    fn begin(&mut self, activity: &str) -> Box<dyn Task> {
        Box::new(Spinner::start(activity, self.palette.clone()))
    }

    fn ask(&mut self, question: &Question) -> Result<Answer> {
        let answer = match &question.kind {
            QuestionKind::YesNo { default } => Confirm::new()
                .with_prompt(&question.text)
                .default(*default)
                .interact_on(&self.term)
                .map(Answer::YesNo),
            QuestionKind::Pick { choices, default } => {
                let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
                Select::new()
                    .with_prompt(&question.text)
                    .items(&labels)
                    .default(*default)
                    .interact_on(&self.term)
                    .map(|index| Answer::Picked(choices[index].value.clone()))
            }
        };
        answer.map_err(|e| InstallerError::Io(e.into()))
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Animated activity line, replaced by the outcome.
struct Spinner {
    bar: ProgressBar,
    palette: Palette,
}

impl Spinner {
    fn start(activity: &str, palette: Palette) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.yellow} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(activity.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar, palette }
    }
}

impl Task for Spinner {
    fn finish(&mut self, tone: Tone, msg: &str) {
        if let Ok(style) = ProgressStyle::with_template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(self.palette.line(tone, msg));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_finish_marks_bar_finished() {
        let mut spinner = Spinner::start("Cloning", Palette::plain());
        spinner.finish(Tone::Success, "Repository cloned");
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn terminal_ui_follows_stdout() {
        let ui = TerminalUI::new(Verbosity::Quiet, false);
        assert_eq!(ui.is_interactive(), Term::stdout().is_term());
    }
}
