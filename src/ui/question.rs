//! Decisions the installer asks the user to make.
//!
//! Every question carries a stable key and a default. Interactive front ends
//! show the text; headless runs and tests answer by key with a raw string
//! that [`Question::parse_answer`] interprets.

use crate::error::{InstallerError, Result};

use super::UserInterface;

/// One entry of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Shown to the user.
    pub label: String,
    /// Returned when chosen.
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    YesNo { default: bool },
    /// `default` indexes into `choices`.
    Pick { choices: Vec<Choice>, default: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Stable identifier, used for scripted answers.
    pub key: String,
    pub text: String,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    YesNo(bool),
    /// The `value` of the chosen [`Choice`].
    Picked(String),
}

impl Question {
    pub fn yes_no(key: &str, text: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.to_string(),
            text: text.into(),
            kind: QuestionKind::YesNo { default },
        }
    }

    /// A pick-one question. An unknown `default_value` selects the first choice.
    pub fn pick(key: &str, text: impl Into<String>, choices: Vec<Choice>, default_value: &str) -> Self {
        let default = choices
            .iter()
            .position(|c| c.value == default_value)
            .unwrap_or(0);
        Self {
            key: key.to_string(),
            text: text.into(),
            kind: QuestionKind::Pick { choices, default },
        }
    }

    /// The answer given by pressing enter.
    pub fn default_answer(&self) -> Answer {
        match &self.kind {
            QuestionKind::YesNo { default } => Answer::YesNo(*default),
            QuestionKind::Pick { choices, default } => Answer::Picked(
                choices
                    .get(*default)
                    .map(|c| c.value.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Interpret a typed or scripted answer.
    ///
    /// Yes/no questions accept `y`/`yes`/`true`/`1` and their negatives;
    /// pick questions accept a choice's value (any case) or its label.
    pub fn parse_answer(&self, raw: &str) -> Option<Answer> {
        let raw = raw.trim();
        match &self.kind {
            QuestionKind::YesNo { .. } => match raw.to_lowercase().as_str() {
                "y" | "yes" | "true" | "1" => Some(Answer::YesNo(true)),
                "n" | "no" | "false" | "0" => Some(Answer::YesNo(false)),
                _ => None,
            },
            QuestionKind::Pick { choices, .. } => choices
                .iter()
                .find(|c| c.value.eq_ignore_ascii_case(raw) || c.label == raw)
                .map(|c| Answer::Picked(c.value.clone())),
        }
    }

    /// Answer from a scripted string, or the default when none is given.
    pub fn answer_with(&self, scripted: Option<&str>) -> Result<Answer> {
        match scripted {
            Some(raw) => self.parse_answer(raw).ok_or_else(|| self.unanswerable()),
            None => Ok(self.default_answer()),
        }
    }

    fn unanswerable(&self) -> InstallerError {
        InstallerError::PromptUnavailable {
            key: self.key.clone(),
        }
    }
}

/// Ask a yes/no question.
pub fn confirm(ui: &mut dyn UserInterface, key: &str, text: &str, default: bool) -> Result<bool> {
    let question = Question::yes_no(key, text, default);
    match ui.ask(&question)? {
        Answer::YesNo(yes) => Ok(yes),
        Answer::Picked(_) => Err(question.unanswerable()),
    }
}

/// Ask a pick-one question and return the chosen value.
pub fn pick(ui: &mut dyn UserInterface, question: &Question) -> Result<String> {
    match ui.ask(question)? {
        Answer::Picked(value) => Ok(value),
        Answer::YesNo(_) => Err(question.unanswerable()),
    }
}
