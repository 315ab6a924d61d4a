// src/artifacts/mod.rs
//! Derived study artifacts.
//!
//! Every generator is a thin policy (capability kind + options, plus a
//! schema for structured output) over the same call-through:
//!
//! ```text
//! generate(input) = with_retry(|| extract(invoke(kind, options, input)), max_retries)
//! ```

pub mod compare;
pub mod flashcards;
pub mod followup;
pub mod highlights;
pub mod mcq;

use crate::error::GenerationError;
use crate::error_recovery::with_retry;
use crate::extraction::{extract, ArtifactSchema};
use crate::generation::GenerativeAdapter;
use crate::types::{CapabilityKind, GenerationOptions};

/// Which capability to call, how to configure it, and how often to retry.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPolicy {
    pub kind: CapabilityKind,
    pub options: GenerationOptions,
    pub max_retries: u32,
}

impl ArtifactPolicy {
    pub fn new(kind: CapabilityKind, options: GenerationOptions, max_retries: u32) -> Self {
        Self {
            kind,
            options,
            max_retries,
        }
    }
}

/// Generates a typed list validated against `S`, retrying on any fault.
pub async fn generate_structured<S: ArtifactSchema>(
    adapter: &GenerativeAdapter,
    policy: &ArtifactPolicy,
    input: &str,
) -> Result<Vec<S::Item>, GenerationError> {
    with_retry(
        || async move {
            let raw = adapter.invoke(policy.kind, &policy.options, input).await?;
            let items = extract::<S>(&raw).inspect_err(|e| {
                log::debug!("Rejected {} output: {}", S::NAME, e);
            })?;
            Ok(items)
        },
        policy.max_retries,
    )
    .await
}

/// Generates free-form text, retrying on capability faults.
pub async fn generate_text(
    adapter: &GenerativeAdapter,
    policy: &ArtifactPolicy,
    input: &str,
) -> Result<String, GenerationError> {
    with_retry(
        || async move { adapter.invoke(policy.kind, &policy.options, input).await },
        policy.max_retries,
    )
    .await
}
