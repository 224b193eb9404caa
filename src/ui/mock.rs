//! Recording front end for tests.
//!
//! # Example
//!
//! ```
//! use ricsi::ui::{confirm, MockUI, Tone, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.answer("delete_and_reclone", "yes");
//!
//! assert!(confirm(&mut ui, "delete_and_reclone", "Delete?", false).unwrap());
//! ui.success("Repository cloned");
//!
//! assert_eq!(ui.asked_keys(), vec!["delete_and_reclone"]);
//! assert!(ui.shows(Tone::Success, "cloned"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{Answer, Question, Task, Tone, UserInterface};

type Lines = Rc<RefCell<Vec<(Tone, String)>>>;

/// Records every line and question; answers by key.
///
/// Task outcomes land in the same log as status lines.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    lines: Lines,
    hints: Vec<String>,
    headers: Vec<String>,
    activities: Vec<String>,
    answers: HashMap<String, String>,
    asked: Vec<Question>,
}

impl MockUI {
    /// A non-interactive mock that takes every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the raw answer to the question with `key`.
    pub fn answer(&mut self, key: &str, raw: &str) {
        self.answers.insert(key.to_string(), raw.to_string());
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Whether a line of this tone containing `text` was shown.
    pub fn shows(&self, tone: Tone, text: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(t, line)| *t == tone && line.contains(text))
    }

    pub fn shows_hint(&self, text: &str) -> bool {
        self.hints.iter().any(|h| h.contains(text))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Activity lines of started tasks.
    pub fn activities(&self) -> &[String] {
        &self.activities
    }

    /// Keys of asked questions, in order.
    pub fn asked_keys(&self) -> Vec<String> {
        self.asked.iter().map(|q| q.key.clone()).collect()
    }

    /// The last question asked with `key`.
    pub fn question(&self, key: &str) -> Option<&Question> {
        self.asked.iter().rev().find(|q| q.key == key)
    }
}

impl UserInterface for MockUI {
    fn say(&mut self, tone: Tone, msg: &str) {
        self.lines.borrow_mut().push((tone, msg.to_string()));
    }

    fn hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn begin(&mut self, activity: &str) -> Box<dyn Task> {
        self.activities.push(activity.to_string());
        Box::new(RecordedTask {
            lines: Rc::clone(&self.lines),
        })
    }

    fn ask(&mut self, question: &Question) -> Result<Answer> {
        self.asked.push(question.clone());
        question.answer_with(self.answers.get(&question.key).map(String::as_str))
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

struct RecordedTask {
    lines: Lines,
}

impl Task for RecordedTask {
    fn finish(&mut self, tone: Tone, msg: &str) {
        self.lines.borrow_mut().push((tone, msg.to_string()));
    }
}
