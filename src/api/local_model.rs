// src/api/local_model.rs
//! The summarizer and writer capabilities backed by a local model server.

use super::client::LocalModelClient;
use super::responses::GenerateRequest;
use crate::algebras::{
    Availability, Capability, CapabilityError, CapabilityHandle, ProgressObserver,
};
use crate::types::{CapabilityKind, GenerationOptions};
use async_trait::async_trait;

/// One model served locally, acting as either summarizer or writer.
pub struct LocalModel {
    client: LocalModelClient,
    model: String,
    kind: CapabilityKind,
}

impl LocalModel {
    pub fn summarizer(client: LocalModelClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            kind: CapabilityKind::Summarizer,
        }
    }

    pub fn writer(client: LocalModelClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            kind: CapabilityKind::Writer,
        }
    }
}

/// Whether an installed tag refers to the requested model.
fn is_same_model(installed: &str, requested: &str) -> bool {
    installed == requested
        || (!requested.contains(':') && installed == format!("{}:latest", requested))
}

#[async_trait]
impl Capability for LocalModel {
    async fn availability(&self) -> Availability {
        match self.client.list_models().await {
            Ok(models) if models.iter().any(|m| is_same_model(m, &self.model)) => {
                Availability::Available
            }
            Ok(_) => Availability::Downloadable,
            Err(e) => {
                log::warn!("Model server unreachable: {}", e);
                Availability::Unavailable
            }
        }
    }

    async fn create(
        &self,
        options: &GenerationOptions,
    ) -> Result<Box<dyn CapabilityHandle>, CapabilityError> {
        log::debug!("Creating {} instance of {}", self.kind, self.model);
        Ok(Box::new(LocalModelHandle {
            client: self.client.clone(),
            model: self.model.clone(),
            kind: self.kind,
            options: options.clone(),
        }))
    }
}

struct LocalModelHandle {
    client: LocalModelClient,
    model: String,
    kind: CapabilityKind,
    options: GenerationOptions,
}

#[async_trait]
impl CapabilityHandle for LocalModelHandle {
    async fn ready(&mut self, on_progress: ProgressObserver<'_>) -> Result<(), CapabilityError> {
        self.client.pull(&self.model, on_progress).await
    }

    async fn invoke(&mut self, input: &str) -> Result<String, CapabilityError> {
        let system = system_prompt(&self.options);
        let prompt = user_prompt(self.kind, &self.options, input);
        let request = GenerateRequest {
            model: &self.model,
            system: Some(&system),
            prompt: Some(&prompt),
            stream: false,
            keep_alive: None,
        };
        self.client.generate(&request).await
    }

    async fn destroy(self: Box<Self>) {
        if let Err(e) = self.client.unload(&self.model).await {
            log::debug!("Unloading {} failed: {}", self.model, e);
        }
    }
}

/// Shared context followed by any per-call instructions.
pub(crate) fn system_prompt(options: &GenerationOptions) -> String {
    match &options.instructions {
        Some(instructions) => format!("{}\n\n{}", options.shared_context, instructions),
        None => options.shared_context.clone(),
    }
}

/// The summarizer is told what shape of summary to produce; the writer gets
/// the input as its task, followed by length and format directions.
pub(crate) fn user_prompt(kind: CapabilityKind, options: &GenerationOptions, input: &str) -> String {
    match kind {
        CapabilityKind::Summarizer => format!(
            "Summarize the following text as {}. {} {}\n\nText:\n{}",
            options.summary_type.direction(),
            options.length.direction(),
            options.format.direction(),
            input
        ),
        CapabilityKind::Writer => format!(
            "{}\n\n{} {}",
            input,
            options.length.direction(),
            options.format.direction()
        ),
    }
}
