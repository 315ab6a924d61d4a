// src/artifacts/mcq.rs
//! Multiple-choice questions from a summary.

use super::{generate_structured, ArtifactPolicy};
use crate::constants::MCQ_CONTEXT;
use crate::error::GenerationError;
use crate::extraction::McqSchema;
use crate::generation::GenerativeAdapter;
use crate::types::{CapabilityKind, GenerationOptions, McqItem, OutputFormat, SummaryLength};

/// Writer, plain text, raw-JSON prompt; length follows the user's choice.
pub fn policy(length: SummaryLength, max_retries: u32) -> ArtifactPolicy {
    ArtifactPolicy::new(
        CapabilityKind::Writer,
        GenerationOptions::new(MCQ_CONTEXT)
            .with_format(OutputFormat::PlainText)
            .with_length(length),
        max_retries,
    )
}

pub async fn generate_mcqs(
    adapter: &GenerativeAdapter,
    summary: &str,
    length: SummaryLength,
    max_retries: u32,
) -> Result<Vec<McqItem>, GenerationError> {
    let items =
        generate_structured::<McqSchema>(adapter, &policy(length, max_retries), summary).await?;
    log::info!("Generated {} multiple-choice question(s)", items.len());
    Ok(items)
}

/// Running score of an interactive quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizScore {
    pub correct: usize,
    pub answered: usize,
}

impl QuizScore {
    pub fn record(&mut self, correct: bool) {
        self.answered += 1;
        if correct {
            self.correct += 1;
        }
    }
}
