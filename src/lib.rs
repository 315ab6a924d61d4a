// src/lib.rs
//! study-assistant library: summaries and study aids for a page of text,
//! generated by a local model.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `GenerationError`, `ExtractionError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `SessionConfig`
//! - **Domain types**: `PageContent`, `SummaryState`, `GenerationOptions`, `McqItem`, `Flashcard`
//! - **Capability contract**: `Capability`, `CapabilityHandle`, `GenerativeAdapter`
//! - **Core**: `extract`, `with_retry`, `ContentStateManager`, `StudySession`
//! - **Collaborators**: `ContentSource`, `PageFetcher`, `RenderSink`
//! - **Outputs**: `TerminalSink`, export planning and delivery

pub mod algebras;
pub mod api;
pub mod artifacts;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_recovery;
pub mod extraction;
pub mod formatting;
pub mod generation;
pub mod output;
pub mod pipeline;
pub mod session;
pub mod sources;
pub mod state;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ExtractionError, GenerationError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SessionConfig, SourceInput};

// --- Domain Types ---
pub use crate::types::{
    AnswerVerdict, CapabilityKind, Flashcard, GenerationOptions, McqItem, OptionChange,
    OutputFormat, PageContent, SummaryLength, SummaryState, SummaryType,
};

// --- Capability Contract ---
pub use crate::algebras::{
    Availability, Capability, CapabilityError, CapabilityHandle, DownloadProgress,
};
pub use crate::generation::GenerativeAdapter;

// --- Core ---
pub use crate::error_recovery::with_retry;
pub use crate::extraction::{extract, FlashcardSchema, McqSchema};
pub use crate::session::{Highlights, StudySession};
pub use crate::state::{ContentStateManager, SummaryPhase};

// --- Collaborators ---
pub use crate::pipeline::{ArtifactSlot, ContentSource, PageFetcher, RenderSink};

// --- Outputs ---
pub use crate::formatting::TerminalSink;
