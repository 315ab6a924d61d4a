// src/types/artifacts.rs
//! Study artifacts derived from a summary.

use serde::{Deserialize, Serialize};

/// One multiple-choice question.
///
/// `answer` is the leading label of the correct choice (`"A"` for
/// `"A. Paris"`), not the choice text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqItem {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
}

/// Outcome of answering a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerVerdict {
    Correct,
    Incorrect { correct_answer: String },
}

impl AnswerVerdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Feedback line shown under the question.
    pub fn feedback(&self) -> String {
        match self {
            Self::Correct => "✅ Correct!".to_string(),
            Self::Incorrect { correct_answer } => {
                format!("❌ Incorrect. Correct answer: {}", correct_answer)
            }
        }
    }
}

impl McqItem {
    /// Judges a selected choice by prefix match against `answer`.
    ///
    /// The match is `choice.starts_with(answer)`. An answer that prefixes
    /// several choices (e.g. `"A"` against `"A. x"` and `"Apples"`) makes
    /// more than one choice "correct"; callers get no warning about that.
    pub fn judge(&self, choice: &str) -> AnswerVerdict {
        if choice.starts_with(self.answer.as_str()) {
            AnswerVerdict::Correct
        } else {
            AnswerVerdict::Incorrect {
                correct_answer: self.answer.clone(),
            }
        }
    }

    /// Maps free-form input to one of the choices.
    ///
    /// Accepts the full choice text or its leading label (`"b"` selects
    /// `"B. Rome"`), case-insensitively.
    pub fn resolve_choice(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(exact) = self
            .choices
            .iter()
            .find(|choice| choice.trim().eq_ignore_ascii_case(input))
        {
            return Some(exact.as_str());
        }

        let label = input.to_uppercase();
        self.choices
            .iter()
            .find(|choice| {
                choice
                    .to_uppercase()
                    .strip_prefix(label.as_str())
                    .is_some_and(|rest| rest.chars().next().map_or(true, |c| !c.is_alphanumeric()))
            })
            .map(String::as_str)
    }
}

/// A two-sided study card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}
