// src/types/content.rs
//! Page text and the summary derived from it.

use crate::constants::{ERROR_MARKER, NOTHING_TO_SUMMARIZE};
use std::fmt;

/// Extracted page text, compared by value.
///
/// Two contents are "unchanged" when they are byte-equal; nothing else about
/// the text is interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PageContent(String);

impl PageContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in characters, the unit of the model's input ceiling.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the text exceeds `max_chars` characters.
    pub fn exceeds(&self, max_chars: usize) -> bool {
        // Byte length bounds char count from above, so short inputs skip the scan.
        self.0.len() > max_chars && self.char_count() > max_chars
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for PageContent {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for PageContent {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for PageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current summary and whether dependent features may use it.
///
/// `valid` is derived, never set directly: it holds exactly when the text
/// is present, does not start with [`ERROR_MARKER`] and is not the
/// [`NOTHING_TO_SUMMARIZE`] sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryState {
    text: Option<String>,
    valid: bool,
}

impl SummaryState {
    /// No summary at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let valid = is_usable_summary(&text);
        Self {
            text: Some(text),
            valid,
        }
    }

    /// An error string shown in place of a summary.
    pub fn from_error(message: impl fmt::Display) -> Self {
        Self::from_text(format!("{}: {}", ERROR_MARKER, message))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The summary text, only when it is valid.
    pub fn valid_text(&self) -> Option<&str> {
        if self.valid {
            self.text.as_deref()
        } else {
            None
        }
    }
}

/// Validity predicate shared by the state manager and the UI gate.
pub fn is_usable_summary(text: &str) -> bool {
    !text.starts_with(ERROR_MARKER) && text != NOTHING_TO_SUMMARIZE
}
