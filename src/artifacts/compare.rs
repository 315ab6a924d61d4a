// src/artifacts/compare.rs
//! Cross-page comparison of two summaries.

use super::{generate_text, ArtifactPolicy};
use crate::constants::COMPARISON_CONTEXT;
use crate::error::GenerationError;
use crate::generation::GenerativeAdapter;
use crate::types::{
    is_usable_summary, CapabilityKind, GenerationOptions, OutputFormat, PageContent,
    SummaryLength,
};

/// Writer, markdown, medium.
pub fn policy(max_retries: u32) -> ArtifactPolicy {
    ArtifactPolicy::new(
        CapabilityKind::Writer,
        GenerationOptions::new(COMPARISON_CONTEXT)
            .with_format(OutputFormat::Markdown)
            .with_length(SummaryLength::Medium),
        max_retries,
    )
}

pub fn comparison_prompt(current: &str, other: &str) -> String {
    format!(
        "\nCompare the following two summaries and highlight:\n\
         - Key differences\n\
         - Agreements\n\
         - Important points from each\n\
         \n\
         Summary 1:\n{}\n\
         \n\
         Summary 2:\n{}\n",
        current, other
    )
}

/// Inputs that stay fixed for one comparison.
pub struct ComparisonRequest<'a> {
    pub current_summary: &'a str,
    pub other_page: &'a PageContent,
    /// Options the current page was summarized with; reused for the other page.
    pub summary_options: &'a GenerationOptions,
    pub max_chars: usize,
    pub max_retries: u32,
}

/// Summarizes the other page, then asks the writer to compare both summaries.
pub async fn compare_pages(
    adapter: &GenerativeAdapter,
    request: ComparisonRequest<'_>,
) -> Result<String, GenerationError> {
    let other = request.other_page;
    if other.is_empty() {
        return Err(GenerationError::GenerationFailed(
            "The comparison page has no readable text".to_string(),
        ));
    }
    if other.exceeds(request.max_chars) {
        return Err(GenerationError::ContentTooLarge {
            length: other.char_count(),
            max: request.max_chars,
        });
    }

    let summary_policy = ArtifactPolicy::new(
        CapabilityKind::Summarizer,
        request.summary_options.clone(),
        request.max_retries,
    );
    let other_summary = generate_text(adapter, &summary_policy, other.as_str()).await?;
    if !is_usable_summary(&other_summary) {
        return Err(GenerationError::GenerationFailed(format!(
            "Could not summarize the comparison page: {}",
            other_summary
        )));
    }

    let prompt = comparison_prompt(request.current_summary, &other_summary);
    let comparison = generate_text(adapter, &policy(request.max_retries), &prompt).await?;
    log::info!("Comparison generated ({} characters)", comparison.len());
    Ok(comparison)
}
