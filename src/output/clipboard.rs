// src/output/clipboard.rs
//! Clipboard access: arboard first, then the platform's copy command.

use crate::error::AppError;
use std::io::Write;
use std::process::{Command, Stdio};

pub fn copy_to_clipboard(content: &str) -> Result<(), AppError> {
    log::debug!("Copying {} characters to clipboard", content.chars().count());

    match copy_with_arboard(content) {
        Ok(()) => {
            log::info!("Summary copied to clipboard");
            return Ok(());
        }
        Err(e) => log::debug!("arboard unavailable ({}), trying copy commands", e),
    }

    let mut last_error = AppError::Clipboard("No clipboard command for this platform".to_string());
    for (program, args) in copy_commands() {
        match pipe_into(program, args, content) {
            Ok(()) => {
                log::info!("Summary copied to clipboard with {}", program);
                return Ok(());
            }
            Err(e) => {
                log::debug!("{} failed: {}", program, e);
                last_error = e;
            }
        }
    }
    log::error!("Failed to copy to clipboard: {}", last_error);
    Err(last_error)
}

fn copy_with_arboard(content: &str) -> Result<(), AppError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(content)?;
    Ok(())
}

type CopyCommand = (&'static str, &'static [&'static str]);

const PBCOPY: CopyCommand = ("pbcopy", &[]);
const CLIP: CopyCommand = ("clip", &[]);
const WL_COPY: CopyCommand = ("wl-copy", &[]);
const XCLIP: CopyCommand = ("xclip", &["-selection", "clipboard"]);

/// Candidate copy commands, most likely first.
fn copy_commands() -> Vec<CopyCommand> {
    if cfg!(target_os = "macos") {
        vec![PBCOPY]
    } else if cfg!(target_os = "windows") {
        vec![CLIP]
    } else if std::env::var("WAYLAND_DISPLAY").is_ok() {
        vec![WL_COPY, XCLIP]
    } else {
        vec![XCLIP, WL_COPY]
    }
}

fn pipe_into(program: &str, args: &[&str], content: &str) -> Result<(), AppError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(content.as_bytes())
            .map_err(|e| AppError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| AppError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;
    if output.status.success() {
        Ok(())
    } else {
        Err(AppError::Clipboard(format!(
            "{} failed: {}",
            program,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}
