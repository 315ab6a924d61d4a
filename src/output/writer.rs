// src/output/writer.rs
//! Performs the I/O described by an [`OutputPlan`].

use super::clipboard::copy_to_clipboard;
use super::types::{DeliveryTarget, OutputPlan, OutputReport};
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Runs every delivery in order. A failed delivery does not stop the rest;
/// failures are collected in the report.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    log::debug!("Delivering {} exports", plan.operations.len());

    let mut report = OutputReport::default();
    for target in plan.operations {
        report = match execute(&target) {
            Ok(()) => report.with_completed(target),
            Err(e) => {
                log::error!("Export to {} failed: {}", target, e);
                let error = e.to_string();
                report.with_failed(target, error)
            }
        };
    }

    log::info!(
        "Exports finished: {} delivered ({} bytes), {} failed",
        report.completed.len(),
        report.bytes_written,
        report.failed.len()
    );
    report
}

/// Like [`deliver`], but any failure becomes [`AppError::DeliveryFailed`].
pub fn deliver_all(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let report = deliver(plan);
    if report.is_success() {
        Ok(report)
    } else {
        Err(AppError::DeliveryFailed {
            failures: report.failure_messages(),
        })
    }
}

fn execute(target: &DeliveryTarget) -> Result<(), AppError> {
    match target {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::CopyToClipboard { content } => copy_to_clipboard(content),
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
