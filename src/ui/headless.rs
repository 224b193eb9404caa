//! Front end for `--yes`, CI and piped output.
//!
//! Nothing is animated and nobody is asked. Each question takes the value of
//! `RICSI_PROMPT_<KEY>` when set, its default otherwise.

use std::collections::HashMap;

use crate::error::Result;

use super::{Answer, Palette, Question, Task, Tone, UserInterface, Verbosity};

/// Prefix of the environment variables that answer questions.
pub const ANSWER_ENV_PREFIX: &str = "RICSI_PROMPT_";

pub struct HeadlessUI {
    verbosity: Verbosity,
    /// Scripted answers by lowercase question key.
    answers: HashMap<String, String>,
}

impl HeadlessUI {
    /// Answers come from the given `(key, answer)` pairs.
    pub fn new(verbosity: Verbosity, answers: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            verbosity,
            answers: answers
                .into_iter()
                .map(|(key, answer)| (key.to_lowercase(), answer))
                .collect(),
        }
    }

    /// Answers come from `RICSI_PROMPT_<KEY>` variables.
    pub fn from_env(verbosity: Verbosity) -> Self {
        Self::new(
            verbosity,
            std::env::vars().filter_map(|(name, value)| {
                name.strip_prefix(ANSWER_ENV_PREFIX)
                    .map(|key| (key.to_string(), value))
            }),
        )
    }
}

/// Outcomes go to stdout, problems to stderr.
fn emit(tone: Tone, msg: &str) {
    let line = Palette::plain().line(tone, msg);
    match tone {
        Tone::Info | Tone::Success => println!("{}", line),
        Tone::Warning | Tone::Error => eprintln!("{}", line),
    }
}

impl UserInterface for HeadlessUI {
    fn say(&mut self, tone: Tone, msg: &str) {
        if self.verbosity.shows(tone) {
            emit(tone, msg);
        }
    }

    fn hint(&mut self, hint: &str) {
        println!("{}", Palette::plain().hint(hint));
    }

    fn header(&mut self, title: &str) {
        if self.verbosity == Verbosity::Normal {
            println!("\n{}\n", title);
        }
    }

    fn begin(&mut self, activity: &str) -> Box<dyn Task> {
        self.say(Tone::Info, activity);
        Box::new(StatusLine)
    }

    fn ask(&mut self, question: &Question) -> Result<Answer> {
        let scripted = self.answers.get(&question.key.to_lowercase());
        let answer = question.answer_with(scripted.map(String::as_str))?;
        tracing::debug!("Answered '{}' with {:?}", question.key, answer);
        Ok(answer)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prints only the outcome of a step.
struct StatusLine;

impl Task for StatusLine {
    fn finish(&mut self, tone: Tone, msg: &str) {
        emit(tone, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallerError;

    fn ui_with(pairs: &[(&str, &str)]) -> HeadlessUI {
        HeadlessUI::new(
            Verbosity::Quiet,
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn unanswered_question_takes_default() {
        let mut ui = ui_with(&[]);
        let answer = ui
            .ask(&Question::yes_no("check_integrity", "Check?", true))
            .unwrap();
        assert_eq!(answer, Answer::YesNo(true));
    }

    #[test]
    fn scripted_answer_beats_default() {
        let mut ui = ui_with(&[("DELETE_AND_RECLONE", "yes")]);
        let answer = ui
            .ask(&Question::yes_no("delete_and_reclone", "Delete?", false))
            .unwrap();
        assert_eq!(answer, Answer::YesNo(true));
    }

    #[test]
    fn unparseable_scripted_answer_is_error() {
        let mut ui = ui_with(&[("check_integrity", "sometimes")]);
        let err = ui
            .ask(&Question::yes_no("check_integrity", "Check?", true))
            .unwrap_err();
        assert!(matches!(err, InstallerError::PromptUnavailable { .. }));
    }

    #[test]
    fn is_never_interactive() {
        assert!(!ui_with(&[]).is_interactive());
    }
}
