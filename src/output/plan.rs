// src/output/plan.rs
//! Pure construction of the export plan for a finished session.

use super::csv::flashcards_to_csv;
use super::types::{DeliveryTarget, OutputPlan};
use crate::types::Flashcard;
use chrono::NaiveDateTime;
use std::path::PathBuf;

pub const SUMMARY_FILE_NAME: &str = "summary.txt";
pub const FLASHCARDS_FILE_NAME: &str = "flashcards.csv";

/// Where exports should go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSettings {
    pub output_dir: Option<PathBuf>,
    pub clipboard: bool,
    pub pipe: bool,
}

/// The summary file body: a timestamp line, a blank line, the summary.
pub fn summary_document(summary: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "Summary generated {}\n\n{}\n",
        generated_at.format("%Y-%m-%d %H:%M"),
        summary.trim_end()
    )
}

/// Plans every export the settings ask for.
///
/// Nothing is exported without a valid summary. Flashcards are written
/// only when there are some and an output directory is set.
pub fn plan_exports(
    settings: &ExportSettings,
    valid_summary: Option<&str>,
    flashcards: &[Flashcard],
    generated_at: NaiveDateTime,
) -> OutputPlan {
    let Some(summary) = valid_summary else {
        return OutputPlan::new();
    };

    let mut plan = OutputPlan::new();
    if let Some(dir) = &settings.output_dir {
        plan = plan.with_operation(DeliveryTarget::WriteFile {
            path: dir.join(SUMMARY_FILE_NAME),
            content: summary_document(summary, generated_at),
        });
        if !flashcards.is_empty() {
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: dir.join(FLASHCARDS_FILE_NAME),
                content: flashcards_to_csv(flashcards),
            });
        }
    }
    if settings.clipboard {
        plan = plan.with_operation(DeliveryTarget::CopyToClipboard {
            content: summary.to_string(),
        });
    }
    if settings.pipe {
        plan = plan.with_operation(DeliveryTarget::PrintToStdout {
            content: format!("{}\n", summary.trim_end()),
        });
    }
    plan
}
