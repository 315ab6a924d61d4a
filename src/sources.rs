// src/sources.rs
//! Page-content sources for the command line: a file (optionally watched),
//! standard input, or a URL.

use crate::api::{extract_paragraphs, HttpPageFetcher};
use crate::error::AppError;
use crate::pipeline::{ContentSource, PageFetcher};
use crate::types::PageContent;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// A receiver that is already closed: the source never changes.
fn closed_channel() -> mpsc::Receiver<PageContent> {
    let (_tx, rx) = mpsc::channel(1);
    rx
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

async fn read_page_file(path: &Path) -> Result<PageContent, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::ContentUnavailable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
    let text = if is_html(path) {
        extract_paragraphs(&raw)
    } else {
        raw.trim().to_string()
    };
    Ok(PageContent::new(text))
}

/// Reads a text or HTML file; when watched, re-reads it on every tick.
pub struct FileSource {
    path: PathBuf,
    poll_interval: Option<Duration>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: None,
        }
    }

    /// Re-reads the file every `interval`, sending whatever it holds.
    pub fn watched(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }
}

#[async_trait::async_trait]
impl ContentSource for FileSource {
    async fn initial(&self) -> Result<PageContent, AppError> {
        read_page_file(&self.path).await
    }

    fn subscribe(&self) -> mpsc::Receiver<PageContent> {
        let Some(interval) = self.poll_interval else {
            return closed_channel();
        };

        let (tx, rx) = mpsc::channel(4);
        let path = self.path.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match read_page_file(&path).await {
                    Ok(content) => {
                        if tx.send(content).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => log::warn!("Watching {} failed: {}", path.display(), e),
                }
            }
            log::debug!("Stopped watching {}", path.display());
        });
        rx
    }
}

/// Reads all of standard input once.
pub struct StdinSource;

#[async_trait::async_trait]
impl ContentSource for StdinSource {
    async fn initial(&self) -> Result<PageContent, AppError> {
        let text = tokio::task::spawn_blocking(|| {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map(|_| text)
        })
        .await
        .map_err(|e| AppError::InternalError {
            message: "stdin reader panicked".to_string(),
            source: Some(Box::new(e)),
        })??;
        Ok(PageContent::new(text.trim()))
    }

    fn subscribe(&self) -> mpsc::Receiver<PageContent> {
        closed_channel()
    }
}

/// Fetches a page once over HTTP(S).
pub struct UrlSource {
    url: String,
    fetcher: HttpPageFetcher,
}

impl UrlSource {
    pub fn new(url: impl Into<String>, fetcher: HttpPageFetcher) -> Self {
        Self {
            url: url.into(),
            fetcher,
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for UrlSource {
    async fn initial(&self) -> Result<PageContent, AppError> {
        self.fetcher.fetch_page(&self.url).await
    }

    fn subscribe(&self) -> mpsc::Receiver<PageContent> {
        closed_channel()
    }
}
