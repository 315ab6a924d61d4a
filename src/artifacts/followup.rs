// src/artifacts/followup.rs
//! Answers to follow-up questions about the summary.

use super::{generate_text, ArtifactPolicy};
use crate::constants::{FOLLOW_UP_CONTEXT, FOLLOW_UP_INSTRUCTIONS};
use crate::error::GenerationError;
use crate::generation::GenerativeAdapter;
use crate::types::{CapabilityKind, GenerationOptions, OutputFormat, SummaryLength};

/// Writer, markdown, short. Ignores the user's summary options.
pub fn policy(max_retries: u32) -> ArtifactPolicy {
    ArtifactPolicy::new(
        CapabilityKind::Writer,
        GenerationOptions::new(FOLLOW_UP_CONTEXT)
            .with_format(OutputFormat::Markdown)
            .with_length(SummaryLength::Short)
            .with_instructions(FOLLOW_UP_INSTRUCTIONS),
        max_retries,
    )
}

pub fn follow_up_prompt(summary: &str, question: &str) -> String {
    format!("You said {}. But {}?", summary, question)
}

/// Answers `question` against `summary`. Blank questions yield `None`.
pub async fn ask_follow_up(
    adapter: &GenerativeAdapter,
    summary: &str,
    question: &str,
    max_retries: u32,
) -> Result<Option<String>, GenerationError> {
    let question = question.trim();
    if question.is_empty() {
        return Ok(None);
    }

    let prompt = follow_up_prompt(summary, question);
    let answer = generate_text(adapter, &policy(max_retries), &prompt).await?;
    Ok(Some(answer))
}
