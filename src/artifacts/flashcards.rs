// src/artifacts/flashcards.rs
//! Flashcards from a summary.

use super::{generate_structured, ArtifactPolicy};
use crate::constants::FLASHCARD_CONTEXT;
use crate::error::GenerationError;
use crate::extraction::FlashcardSchema;
use crate::generation::GenerativeAdapter;
use crate::types::{CapabilityKind, Flashcard, GenerationOptions, OutputFormat, SummaryLength};

pub fn policy(length: SummaryLength, max_retries: u32) -> ArtifactPolicy {
    ArtifactPolicy::new(
        CapabilityKind::Writer,
        GenerationOptions::new(FLASHCARD_CONTEXT)
            .with_format(OutputFormat::PlainText)
            .with_length(length),
        max_retries,
    )
}

pub async fn generate_flashcards(
    adapter: &GenerativeAdapter,
    summary: &str,
    length: SummaryLength,
    max_retries: u32,
) -> Result<Vec<Flashcard>, GenerationError> {
    let cards =
        generate_structured::<FlashcardSchema>(adapter, &policy(length, max_retries), summary)
            .await?;
    log::info!("Generated {} flashcard(s)", cards.len());
    Ok(cards)
}
