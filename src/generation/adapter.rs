// src/generation/adapter.rs
//! Uniform request/response access to the summarizer and writer.

use crate::algebras::{Availability, Capability, CapabilityError, DownloadProgress};
use crate::constants::NOTHING_TO_SUMMARIZE;
use crate::error::GenerationError;
use crate::types::{CapabilityKind, GenerationOptions};
use std::sync::Arc;

/// Routes a request to the capability named by its kind and manages the
/// instance lifecycle around it.
///
/// No retries happen here; see [`crate::error_recovery::with_retry`].
#[derive(Clone)]
pub struct GenerativeAdapter {
    summarizer: Arc<dyn Capability>,
    writer: Arc<dyn Capability>,
}

impl GenerativeAdapter {
    pub fn new(summarizer: Arc<dyn Capability>, writer: Arc<dyn Capability>) -> Self {
        Self { summarizer, writer }
    }

    fn capability(&self, kind: CapabilityKind) -> &Arc<dyn Capability> {
        match kind {
            CapabilityKind::Summarizer => &self.summarizer,
            CapabilityKind::Writer => &self.writer,
        }
    }

    /// Runs one generation: check availability, acquire, await readiness, invoke, release.
    ///
    /// The acquired instance is destroyed before this returns, whether the
    /// invocation succeeded or not. Empty output becomes
    /// [`NOTHING_TO_SUMMARIZE`].
    pub async fn invoke(
        &self,
        kind: CapabilityKind,
        options: &GenerationOptions,
        input: &str,
    ) -> Result<String, GenerationError> {
        let capability = self.capability(kind);

        let availability = capability.availability().await;
        log::debug!("{} availability: {}", kind, availability);
        if availability == Availability::Unavailable {
            return Err(GenerationError::CapabilityUnavailable { kind });
        }

        let mut handle = capability
            .create(options)
            .await
            .map_err(|e| generation_failed(kind, e))?;

        let outcome = async {
            if availability != Availability::Available {
                let log_progress = |progress: DownloadProgress| {
                    log::info!("Downloaded {:.0}%", progress.percent());
                };
                handle.ready(&log_progress).await?;
            }
            handle.invoke(input).await
        }
        .await;

        handle.destroy().await;

        let output = outcome.map_err(|e| generation_failed(kind, e))?;
        if output.is_empty() {
            log::debug!("{} returned no output", kind);
            return Ok(NOTHING_TO_SUMMARIZE.to_string());
        }

        log::debug!("{} produced {} characters", kind, output.len());
        Ok(output)
    }
}

fn generation_failed(kind: CapabilityKind, err: CapabilityError) -> GenerationError {
    if err.is_transient() {
        log::warn!("{} call failed: {}", kind, err);
    } else {
        log::error!("{} call failed: {}", kind, err);
    }
    GenerationError::GenerationFailed(err.to_string())
}
