// src/state/mod.rs
//! Content state: the page text, the summary derived from it, and the gate
//! that keeps dependent controls in step with summary validity.

use crate::constants::{LOADING_MESSAGE, NOTHING_TO_SUMMARIZE};
use crate::error::GenerationError;
use crate::generation::GenerativeAdapter;
use crate::pipeline::RenderSink;
use crate::types::{CapabilityKind, GenerationOptions, PageContent, SummaryState};
use std::fmt;
use std::sync::Arc;

/// Where the summary stands relative to the current content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPhase {
    /// No content to summarize.
    Empty,
    /// A summary is being generated.
    Pending,
    /// The summary is usable by dependent features.
    Valid,
    /// A summary string exists but is an error or the empty sentinel.
    Invalid,
    /// Content exceeds the model's input ceiling; no summary was attempted.
    Rejected,
}

impl fmt::Display for SummaryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Pending => "pending",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Owns the remembered content and the summary.
///
/// Regeneration work is proportional to the number of *distinct* contents
/// seen, not to the number of change notifications: a notification carrying
/// the remembered content is a no-op. Generation faults never escape; they
/// become an invalid summary string.
pub struct ContentStateManager {
    adapter: GenerativeAdapter,
    sink: Arc<dyn RenderSink>,
    options: GenerationOptions,
    max_chars: usize,
    content: Option<PageContent>,
    summary: SummaryState,
    phase: SummaryPhase,
    generations: u64,
}

impl ContentStateManager {
    pub fn new(
        adapter: GenerativeAdapter,
        sink: Arc<dyn RenderSink>,
        options: GenerationOptions,
        max_chars: usize,
    ) -> Self {
        Self {
            adapter,
            sink,
            options,
            max_chars,
            content: None,
            summary: SummaryState::empty(),
            phase: SummaryPhase::Empty,
            generations: 0,
        }
    }

    pub fn summary(&self) -> &SummaryState {
        &self.summary
    }

    pub fn phase(&self) -> SummaryPhase {
        self.phase
    }

    /// The last content processed, if any.
    pub fn content(&self) -> Option<&PageContent> {
        self.content.as_ref()
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Number of summary generations started so far.
    pub fn generation_count(&self) -> u64 {
        self.generations
    }

    /// Reacts to a content notification.
    pub async fn on_content_change(&mut self, new_content: PageContent) -> SummaryPhase {
        if self.content.as_ref() == Some(&new_content) {
            log::debug!("Content unchanged, skipping regeneration");
            return self.phase;
        }

        let content = self.content.insert(new_content).clone();

        if content.is_empty() {
            log::info!("No page content to summarize");
            self.reject(SummaryPhase::Empty, NOTHING_TO_SUMMARIZE);
            return self.phase;
        }

        if content.exceeds(self.max_chars) {
            let warning = GenerationError::ContentTooLarge {
                length: content.char_count(),
                max: self.max_chars,
            };
            log::warn!("{}", warning);
            self.reject(SummaryPhase::Rejected, &warning.to_string());
            return self.phase;
        }

        self.sink.show_warning("");
        self.phase = SummaryPhase::Pending;
        self.sink.show_summary(LOADING_MESSAGE);
        self.generations += 1;

        log::info!(
            "Summarizing {} characters ({}, {}, {})",
            content.char_count(),
            self.options.summary_type,
            self.options.format,
            self.options.length
        );

        let summary = match self
            .adapter
            .invoke(CapabilityKind::Summarizer, &self.options, content.as_str())
            .await
        {
            Ok(text) => SummaryState::from_text(text),
            Err(e) => {
                log::error!("Summary generation failed: {}", e);
                SummaryState::from_error(e)
            }
        };

        self.publish(summary);
        self.phase
    }

    /// Re-evaluates the remembered content under new options.
    ///
    /// Forgets the remembered content first, so the no-op short-circuit in
    /// [`Self::on_content_change`] cannot apply.
    pub async fn on_config_change(&mut self, options: GenerationOptions) -> SummaryPhase {
        self.options = options;
        let previous = self.content.take().unwrap_or_default();
        log::debug!("Configuration changed, regenerating summary");
        self.on_content_change(previous).await
    }

    fn reject(&mut self, phase: SummaryPhase, warning: &str) {
        self.summary = SummaryState::empty();
        self.phase = phase;
        self.sink.show_warning(warning);
        self.sink.show_summary("");
        self.sink.set_controls_enabled(false);
    }

    fn publish(&mut self, summary: SummaryState) {
        self.phase = if summary.is_valid() {
            SummaryPhase::Valid
        } else {
            SummaryPhase::Invalid
        };
        self.sink.show_summary(summary.text().unwrap_or_default());
        self.sink.set_controls_enabled(summary.is_valid());
        self.summary = summary;
        log::info!("Summary is {}", self.phase);
    }
}
