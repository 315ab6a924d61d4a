// src/error.rs
//! Application error types with structured error handling.
//!
//! Three layers of failure meet here. [`ExtractionError`] says how model
//! output failed to match the requested structure, [`GenerationError`] is
//! the taxonomy every generation path reports, and [`AppError`] covers the
//! binary's own concerns (configuration, IO, delivery).

use crate::types::CapabilityKind;
use thiserror::Error;

/// Structured output could not be recovered from generated text.
///
/// Every variant is retryable; callers treat them uniformly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("No JSON array found in model output")]
    NoArrayFound,

    #[error("Malformed JSON in model output: {reason} (fragment: {fragment})")]
    MalformedJson { reason: String, fragment: String },

    #[error("{schema} item {index} violates schema: {reason}")]
    SchemaViolation {
        schema: &'static str,
        index: usize,
        reason: String,
    },
}

/// Failure of any generation path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("{kind} API is not available")]
    CapabilityUnavailable { kind: CapabilityKind },

    #[error("{0}")]
    GenerationFailed(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Text is too long for summarization with {length} characters (maximum supported content length is ~{max} characters).")]
    ContentTooLarge { length: usize, max: usize },

    #[error("No valid summary is available yet")]
    SummaryUnavailable,
}

impl GenerationError {
    /// Whether another attempt could change the outcome.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::ContentTooLarge { .. } | Self::SummaryUnavailable
        )
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error interacting with clipboard: {0}")]
    Clipboard(String),

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Failed to read page content from {source_name}: {reason}")]
    ContentUnavailable { source_name: String, reason: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<arboard::Error> for AppError {
    fn from(err: arboard::Error) -> Self {
        AppError::Clipboard(format!("Clipboard error: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
