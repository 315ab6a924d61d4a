// src/pipeline.rs
//! Collaborator traits: where page text comes from and where results go.
//!
//! Each trait describes a single capability the core consumes, enabling
//! the state manager and the session to be tested without a terminal,
//! a filesystem or a network.

use crate::error::AppError;
use crate::types::{Flashcard, McqItem, PageContent};
use std::fmt;
use tokio::sync::mpsc;

/// Delivers page text: one initial pull, then change notifications.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn initial(&self) -> Result<PageContent, AppError>;

    /// Every message is a candidate new content; repeats are expected.
    /// Sources that never change return an already-closed receiver.
    fn subscribe(&self) -> mpsc::Receiver<PageContent>;
}

/// Retrieves the readable text of another page for comparison.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<PageContent, AppError>;
}

/// Display regions for derived artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactSlot {
    Mcq,
    Flashcards,
    Highlights,
    Comparison,
    FollowUp,
}

impl fmt::Display for ArtifactSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mcq => write!(f, "Multiple Choice Questions"),
            Self::Flashcards => write!(f, "Flashcards"),
            Self::Highlights => write!(f, "Highlights"),
            Self::Comparison => write!(f, "Comparison"),
            Self::FollowUp => write!(f, "Follow-up"),
        }
    }
}

/// Accepts everything the core wants shown. Never asked to return data.
pub trait RenderSink: Send + Sync {
    fn show_summary(&self, text: &str);

    /// An empty warning hides the warning region.
    fn show_warning(&self, text: &str);

    /// Enables or disables controls that need a valid summary.
    fn set_controls_enabled(&self, enabled: bool);

    fn show_mcqs(&self, items: &[McqItem]);

    fn show_flashcards(&self, cards: &[Flashcard]);

    fn show_keywords(&self, keywords: &[String], highlighted: &str);

    /// Free-form markdown (comparison, follow-up) or an error string.
    fn show_text(&self, slot: ArtifactSlot, text: &str);
}
