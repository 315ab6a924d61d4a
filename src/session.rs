// src/session.rs
//! One side-panel session: the content state plus the triggers for every
//! derived artifact.
//!
//! Triggers render their own outcome. A failure is shown as an `Error: …`
//! string in the artifact's slot and also returned, so callers can decide
//! whether it ends the run.

use crate::artifacts::compare::{compare_pages, ComparisonRequest};
use crate::artifacts::flashcards::generate_flashcards;
use crate::artifacts::followup::ask_follow_up;
use crate::artifacts::highlights::{generate_keywords, highlight_keywords};
use crate::artifacts::mcq::generate_mcqs;
use crate::constants::ERROR_MARKER;
use crate::error::{AppError, GenerationError};
use crate::generation::GenerativeAdapter;
use crate::pipeline::{ArtifactSlot, PageFetcher, RenderSink};
use crate::state::{ContentStateManager, SummaryPhase};
use crate::types::{
    Flashcard, GenerationOptions, McqItem, OptionChange, PageContent, SummaryState,
    ValidationError,
};
use std::sync::Arc;

/// Keywords and the page text with them marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlights {
    pub keywords: Vec<String>,
    pub highlighted: String,
}

/// Owns the state manager and exposes the UI triggers.
pub struct StudySession {
    state: ContentStateManager,
    adapter: GenerativeAdapter,
    sink: Arc<dyn RenderSink>,
    max_retries: u32,
}

impl StudySession {
    pub fn new(
        adapter: GenerativeAdapter,
        sink: Arc<dyn RenderSink>,
        summary_options: GenerationOptions,
        max_chars: usize,
        max_retries: u32,
    ) -> Self {
        let state =
            ContentStateManager::new(adapter.clone(), sink.clone(), summary_options, max_chars);
        Self {
            state,
            adapter,
            sink,
            max_retries,
        }
    }

    pub fn state(&self) -> &ContentStateManager {
        &self.state
    }

    pub fn summary(&self) -> &SummaryState {
        self.state.summary()
    }

    pub async fn on_content_change(&mut self, content: PageContent) -> SummaryPhase {
        self.state.on_content_change(content).await
    }

    pub async fn on_config_change(&mut self, options: GenerationOptions) -> SummaryPhase {
        self.state.on_config_change(options).await
    }

    /// Switches one summary option and regenerates for the current content.
    pub async fn apply_option_change(&mut self, change: OptionChange) -> SummaryPhase {
        log::info!("Summary option changed: {}", change);
        let options = self.state.options().clone().with_change(change);
        self.on_config_change(options).await
    }

    /// Parses a typed `<field> <value>` command and applies it. Blank lines
    /// do nothing.
    pub async fn handle_option_command(
        &mut self,
        line: &str,
    ) -> Result<Option<SummaryPhase>, ValidationError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let change = line.parse::<OptionChange>()?;
        Ok(Some(self.apply_option_change(change).await))
    }

    fn valid_summary(&self) -> Result<&str, GenerationError> {
        self.state
            .summary()
            .valid_text()
            .ok_or(GenerationError::SummaryUnavailable)
    }

    fn show_failure(&self, slot: ArtifactSlot, err: &GenerationError) {
        log::error!("{} generation failed: {}", slot, err);
        self.sink
            .show_text(slot, &format!("{}: {}", ERROR_MARKER, err));
    }

    pub async fn generate_mcqs(&self) -> Result<Vec<McqItem>, GenerationError> {
        let outcome = match self.valid_summary() {
            Ok(summary) => {
                generate_mcqs(
                    &self.adapter,
                    summary,
                    self.state.options().length,
                    self.max_retries,
                )
                .await
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(items) => self.sink.show_mcqs(items),
            Err(e) => self.show_failure(ArtifactSlot::Mcq, e),
        }
        outcome
    }

    pub async fn generate_flashcards(&self) -> Result<Vec<Flashcard>, GenerationError> {
        let outcome = match self.valid_summary() {
            Ok(summary) => {
                generate_flashcards(
                    &self.adapter,
                    summary,
                    self.state.options().length,
                    self.max_retries,
                )
                .await
            }
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(cards) => self.sink.show_flashcards(cards),
            Err(e) => self.show_failure(ArtifactSlot::Flashcards, e),
        }
        outcome
    }

    /// Extracts keywords from the page content itself, not the summary.
    pub async fn highlight(&self) -> Result<Highlights, GenerationError> {
        let max_chars = self.state.max_chars();
        let outcome = match self.state.content().filter(|c| !c.is_empty()) {
            Some(content) if content.exceeds(max_chars) => Err(GenerationError::ContentTooLarge {
                length: content.char_count(),
                max: max_chars,
            }),
            Some(content) => generate_keywords(&self.adapter, content.as_str(), self.max_retries)
                .await
                .map(|keywords| Highlights {
                    highlighted: highlight_keywords(content.as_str(), &keywords),
                    keywords,
                }),
            None => Err(GenerationError::GenerationFailed(
                "No page content available.".to_string(),
            )),
        };

        match &outcome {
            Ok(highlights) => self
                .sink
                .show_keywords(&highlights.keywords, &highlights.highlighted),
            Err(e) => self.show_failure(ArtifactSlot::Highlights, e),
        }
        outcome
    }

    /// Fetches another page and compares its summary with the current one.
    pub async fn compare_with(
        &self,
        fetcher: &dyn PageFetcher,
        url: &str,
    ) -> Result<String, AppError> {
        let summary = match self.valid_summary() {
            Ok(summary) => summary,
            Err(e) => {
                self.show_failure(ArtifactSlot::Comparison, &e);
                return Err(e.into());
            }
        };

        let other_page = fetcher.fetch_page(url).await.inspect_err(|e| {
            log::error!("Failed to fetch comparison page: {}", e);
            self.sink.show_text(
                ArtifactSlot::Comparison,
                &format!("{}: {}", ERROR_MARKER, e),
            );
        })?;

        let request = ComparisonRequest {
            current_summary: summary,
            other_page: &other_page,
            summary_options: self.state.options(),
            max_chars: self.state.max_chars(),
            max_retries: self.max_retries,
        };

        match compare_pages(&self.adapter, request).await {
            Ok(comparison) => {
                self.sink.show_text(ArtifactSlot::Comparison, &comparison);
                Ok(comparison)
            }
            Err(e) => {
                self.show_failure(ArtifactSlot::Comparison, &e);
                Err(e.into())
            }
        }
    }

    /// Answers a question about the summary. Blank questions do nothing.
    pub async fn ask(&self, question: &str) -> Result<Option<String>, GenerationError> {
        if question.trim().is_empty() {
            return Ok(None);
        }

        let outcome = match self.valid_summary() {
            Ok(summary) => ask_follow_up(&self.adapter, summary, question, self.max_retries).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(Some(answer)) => self.sink.show_text(ArtifactSlot::FollowUp, answer),
            Ok(None) => {}
            Err(e) => self.show_failure(ArtifactSlot::FollowUp, e),
        }
        outcome
    }
}
