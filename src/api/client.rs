// src/api/client.rs
//! Thin HTTP client for the local model server.
//!
//! Handles request/response plumbing and error bodies. Prompt construction
//! and lifecycle policy live in `local_model`.

use super::responses::{
    ErrorBody, GenerateRequest, GenerateResponse, PullRequest, PullStatus, TagsResponse,
};
use crate::algebras::{CapabilityError, DownloadProgress, ProgressObserver};
use reqwest::{header, Client, Response};
use serde::Serialize;
use url::Url;

/// A thin wrapper around reqwest Client for the model server API.
#[derive(Clone)]
pub struct LocalModelClient {
    client: Client,
    base_url: String,
}

impl LocalModelClient {
    pub fn new(endpoint: &Url) -> Result<Self, CapabilityError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: endpoint.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get(&self, endpoint: &str) -> Result<Response, CapabilityError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        ensure_success(response).await
    }

    async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, CapabilityError> {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        ensure_success(response).await
    }

    /// Names of the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<String>, CapabilityError> {
        let tags: TagsResponse = self.get("api/tags").await?.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Runs a non-streaming generation and returns the generated text.
    pub async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, CapabilityError> {
        let body: GenerateResponse = self.post("api/generate", request).await?.json().await?;
        match body.error {
            Some(message) => Err(CapabilityError::backend(message)),
            None => Ok(body.response),
        }
    }

    /// Downloads `model`, reporting progress from the streamed status lines.
    pub async fn pull(
        &self,
        model: &str,
        on_progress: ProgressObserver<'_>,
    ) -> Result<(), CapabilityError> {
        log::info!("Downloading model {}", model);
        let request = PullRequest {
            model,
            stream: true,
        };
        let mut response = self.post("api/pull", &request).await?;

        let mut buffer: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            buffer.extend_from_slice(&chunk);
            while let Some(newline) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                handle_pull_line(&line, on_progress)?;
            }
        }
        handle_pull_line(&buffer, on_progress)?;

        log::info!("Model {} ready", model);
        Ok(())
    }

    /// Asks the server to drop `model` from memory.
    pub async fn unload(&self, model: &str) -> Result<(), CapabilityError> {
        let request = GenerateRequest {
            model,
            system: None,
            prompt: None,
            stream: false,
            keep_alive: Some(0),
        };
        self.post("api/generate", &request).await?;
        Ok(())
    }
}

/// Parses one NDJSON pull line, forwarding progress and surfacing errors.
pub(crate) fn handle_pull_line(
    line: &[u8],
    on_progress: ProgressObserver<'_>,
) -> Result<(), CapabilityError> {
    let text = String::from_utf8_lossy(line);
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }

    let status: PullStatus = match serde_json::from_str(text) {
        Ok(status) => status,
        Err(e) => {
            log::debug!("Ignoring unparseable pull line ({}): {}", e, text);
            return Ok(());
        }
    };

    if let Some(reason) = status.error {
        return Err(CapabilityError::DownloadFailed { reason });
    }
    if let Some(loaded) = status.fraction() {
        on_progress(DownloadProgress { loaded });
    } else {
        log::debug!("Pull status: {}", status.status);
    }
    Ok(())
}

/// Turns a non-success response into a backend error carrying its message.
async fn ensure_success(response: Response) -> Result<Response, CapabilityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    Err(CapabilityError::Backend {
        status: Some(status.as_u16()),
        message,
    })
}
