// src/output/types.rs
//! Planned deliveries and their outcomes.

use std::fmt;
use std::path::PathBuf;

/// An ordered list of deliveries, built without touching the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// One place an export goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    CopyToClipboard { content: String },
    PrintToStdout { content: String },
}

impl DeliveryTarget {
    pub fn content_len(&self) -> usize {
        match self {
            Self::WriteFile { content, .. }
            | Self::CopyToClipboard { content }
            | Self::PrintToStdout { content } => content.len(),
        }
    }
}

impl fmt::Display for DeliveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteFile { path, .. } => write!(f, "file {}", path.display()),
            Self::CopyToClipboard { .. } => write!(f, "clipboard"),
            Self::PrintToStdout { .. } => write!(f, "stdout"),
        }
    }
}

/// What happened when a plan was delivered.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<DeliveryTarget>,
    pub failed: Vec<FailedDelivery>,
    pub bytes_written: usize,
}

#[derive(Debug, Clone)]
pub struct FailedDelivery {
    pub target: DeliveryTarget,
    pub error: String,
}

impl OutputReport {
    pub fn with_completed(mut self, target: DeliveryTarget) -> Self {
        self.bytes_written += target.content_len();
        self.completed.push(target);
        self
    }

    pub fn with_failed(mut self, target: DeliveryTarget, error: String) -> Self {
        self.failed.push(FailedDelivery { target, error });
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One line per failure, `"<target>: <error>"`.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|f| format!("{}: {}", f.target, f.error))
            .collect()
    }
}
