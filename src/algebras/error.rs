//! Error types for the capability algebra.
//!
//! These describe what a generative backend can report about itself. The
//! adapter layer maps them into the generation taxonomy in `crate::error`.

use std::fmt;

/// Failure reported by a capability backend.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityError {
    /// The backend cannot serve this model or configuration at all.
    Unsupported { reason: String },

    /// The model download or preparation failed.
    DownloadFailed { reason: String },

    /// The backend accepted the request but reported a fault.
    Backend { status: Option<u16>, message: String },

    /// Network or transport error.
    Transport { message: String },
}

impl CapabilityError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            status: None,
            message: message.into(),
        }
    }

    /// Returns `true` when a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Backend {
                status: Some(status),
                ..
            } => matches!(status, 408 | 429 | 500..=599),
            Self::Backend { status: None, .. } => true,
            Self::Unsupported { .. } | Self::DownloadFailed { .. } => false,
        }
    }
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported { reason } => write!(f, "Unsupported: {}", reason),
            Self::DownloadFailed { reason } => write!(f, "Model download failed: {}", reason),
            Self::Backend {
                status: Some(status),
                message,
            } => write!(f, "Model backend error ({}): {}", status, message),
            Self::Backend {
                status: None,
                message,
            } => write!(f, "Model backend error: {}", message),
            Self::Transport { message } => write!(f, "Transport error: {}", message),
        }
    }
}

impl std::error::Error for CapabilityError {}

impl From<reqwest::Error> for CapabilityError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Backend {
                status: Some(status.as_u16()),
                message: err.to_string(),
            },
            None => Self::Transport {
                message: err.to_string(),
            },
        }
    }
}
