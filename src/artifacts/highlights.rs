// src/artifacts/highlights.rs
//! Keyword extraction over page content and in-text highlighting.

use super::{generate_text, ArtifactPolicy};
use crate::constants::{KEYWORD_CONTEXT, NOTHING_TO_SUMMARIZE};
use crate::error::GenerationError;
use crate::generation::GenerativeAdapter;
use crate::types::{CapabilityKind, GenerationOptions, OutputFormat, SummaryLength};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static EXISTING_MARK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<mark>.*?</mark>").expect("static mark pattern is valid")
});

/// Summarizer, plain text, long: the keyword list is asked of the page
/// itself rather than the summary.
pub fn policy(max_retries: u32) -> ArtifactPolicy {
    ArtifactPolicy::new(
        CapabilityKind::Summarizer,
        GenerationOptions::new(KEYWORD_CONTEXT)
            .with_format(OutputFormat::PlainText)
            .with_length(SummaryLength::Long),
        max_retries,
    )
}

pub async fn generate_keywords(
    adapter: &GenerativeAdapter,
    page_text: &str,
    max_retries: u32,
) -> Result<Vec<String>, GenerationError> {
    let raw = generate_text(adapter, &policy(max_retries), page_text).await?;
    let keywords = parse_keywords(&raw);
    log::info!("Extracted {} keyword(s)", keywords.len());
    Ok(keywords)
}

/// Splits a comma-separated model answer into trimmed keywords.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    if raw.trim() == NOTHING_TO_SUMMARIZE {
        return Vec::new();
    }
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wraps whole-word, case-insensitive keyword occurrences in `<mark>`.
///
/// Longer keywords win over the shorter ones they contain. Text already
/// inside a `<mark>` element is left untouched.
pub fn highlight_keywords(text: &str, keywords: &[String]) -> String {
    let Some(pattern) = keyword_pattern(keywords) else {
        return text.to_string();
    };

    let mut highlighted = String::with_capacity(text.len() + keywords.len() * 13);
    let mut cursor = 0;
    for existing in EXISTING_MARK.find_iter(text) {
        highlighted.push_str(&pattern.replace_all(&text[cursor..existing.start()], "<mark>${1}</mark>"));
        highlighted.push_str(existing.as_str());
        cursor = existing.end();
    }
    highlighted.push_str(&pattern.replace_all(&text[cursor..], "<mark>${1}</mark>"));
    highlighted
}

fn keyword_pattern(keywords: &[String]) -> Option<Regex> {
    let mut sorted: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    sorted.dedup();

    let alternation = sorted
        .iter()
        .map(|k| bounded(k))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&format!("({})", alternation))
        .case_insensitive(true)
        .build()
        .inspect_err(|e| log::warn!("Could not build keyword pattern: {}", e))
        .ok()
}

/// Escapes `keyword`, with `\b` only on a side whose edge character is a
/// word character, so `U.S.` and `C++` still match.
fn bounded(keyword: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if keyword.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let trail = if keyword.chars().next_back().is_some_and(is_word) { r"\b" } else { "" };
    format!("{}{}{}", lead, regex::escape(keyword), trail)
}
