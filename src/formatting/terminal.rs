// src/formatting/terminal.rs
//! A [`RenderSink`] that prints to a terminal (or any writer).

use super::report::{render_flashcards, render_keywords, render_mcqs};
use crate::constants::LOADING_MESSAGE;
use crate::error::AppError;
use crate::pipeline::{ArtifactSlot, RenderSink};
use crate::types::{Flashcard, McqItem};
use parking_lot::Mutex;
use std::io::Write;

struct TerminalState<W> {
    out: W,
    controls_enabled: bool,
    warning: Option<String>,
}

/// Prints every region as a markdown section.
///
/// Write errors are logged and otherwise ignored: the sink never fails.
pub struct TerminalSink<W: Write + Send> {
    state: Mutex<TerminalState<W>>,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl TerminalSink<std::io::Sink> {
    /// Discards everything; used in pipe mode where stdout carries only the
    /// exported summary.
    pub fn quiet() -> Self {
        Self::new(std::io::sink())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                controls_enabled: false,
                warning: None,
            }),
        }
    }

    pub fn controls_enabled(&self) -> bool {
        self.state.lock().controls_enabled
    }

    pub fn warning(&self) -> Option<String> {
        self.state.lock().warning.clone()
    }

    pub fn into_inner(self) -> W {
        self.state.into_inner().out
    }

    fn section(&self, heading: &str, body: &str) {
        let mut state = self.state.lock();
        let written = if heading.is_empty() {
            writeln!(state.out, "{}\n", body)
        } else {
            writeln!(state.out, "## {}\n\n{}\n", heading, body)
        };
        if let Err(e) = written.and_then(|_| state.out.flush()) {
            log::warn!("Terminal write failed: {}", e);
        }
    }

    fn rendered(&self, slot: ArtifactSlot, rendering: Result<String, AppError>) {
        match rendering {
            Ok(markdown) => self.section("", &markdown),
            Err(e) => {
                log::error!("Rendering {} failed: {}", slot, e);
                self.section(&slot.to_string(), &format!("Error: {}", e));
            }
        }
    }
}

impl<W: Write + Send> RenderSink for TerminalSink<W> {
    fn show_summary(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        if text == LOADING_MESSAGE {
            self.section("", LOADING_MESSAGE);
        } else {
            self.section("Summary", text);
        }
    }

    fn show_warning(&self, text: &str) {
        let changed = {
            let mut state = self.state.lock();
            let next = (!text.is_empty()).then(|| text.to_string());
            let changed = state.warning != next;
            state.warning = next;
            changed
        };
        if changed && !text.is_empty() {
            self.section("", &format!("⚠️ {}", text));
        }
    }

    fn set_controls_enabled(&self, enabled: bool) {
        log::debug!(
            "Study tools {}",
            if enabled { "enabled" } else { "disabled" }
        );
        self.state.lock().controls_enabled = enabled;
    }

    fn show_mcqs(&self, items: &[McqItem]) {
        self.rendered(ArtifactSlot::Mcq, render_mcqs(items));
    }

    fn show_flashcards(&self, cards: &[Flashcard]) {
        self.rendered(ArtifactSlot::Flashcards, render_flashcards(cards));
    }

    fn show_keywords(&self, keywords: &[String], highlighted: &str) {
        self.rendered(ArtifactSlot::Highlights, render_keywords(keywords, highlighted));
    }

    fn show_text(&self, slot: ArtifactSlot, text: &str) {
        self.section(&slot.to_string(), text);
    }
}
