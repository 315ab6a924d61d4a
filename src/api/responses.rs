// src/api/responses.rs
//! Wire types of the local model server.

use serde::{Deserialize, Serialize};

/// `GET /api/tags`
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

/// `POST /api/generate`
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'a str>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/pull`
#[derive(Debug, Serialize)]
pub struct PullRequest<'a> {
    pub model: &'a str,
    pub stream: bool,
}

/// One NDJSON line of a streamed pull.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct PullStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub completed: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PullStatus {
    /// Fraction downloaded, when the line carries byte counts.
    pub fn fraction(&self) -> Option<f64> {
        match (self.completed, self.total) {
            (Some(completed), Some(total)) if total > 0 => Some(completed as f64 / total as f64),
            _ => None,
        }
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
