// src/formatting/mod.rs
//! Turns study artifacts into markdown and shows them in a terminal.

pub mod report;
pub mod terminal;

pub use report::{render_flashcards, render_keywords, render_mcqs};
pub use terminal::TerminalSink;
