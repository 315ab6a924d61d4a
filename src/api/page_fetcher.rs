// src/api/page_fetcher.rs
//! Retrieves a web page and keeps its readable paragraph text.

use crate::error::AppError;
use crate::pipeline::PageFetcher;
use crate::types::{PageContent, ValidationError};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Fetches pages over HTTP(S).
#[derive(Clone, Default)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parses and restricts a user-supplied URL to HTTP(S).
pub fn parse_page_url(input: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(input.trim()).map_err(|e| ValidationError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: "Only HTTP and HTTPS URLs are supported".to_string(),
        });
    }
    Ok(url)
}

/// Text of every `<p>` element, one paragraph per block.
pub fn extract_paragraphs(html: &str) -> String {
    let paragraph = Selector::parse("p").expect("paragraph selector is valid");
    let document = Html::parse_document(html);
    document
        .select(&paragraph)
        .map(|p| p.text().collect::<String>())
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PageContent, AppError> {
        let url = parse_page_url(url)?;
        log::info!("Fetching page {}", url);

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(AppError::ContentUnavailable {
                source_name: url.to_string(),
                reason: format!("HTTP status {}", response.status()),
            });
        }

        let html = response.text().await?;
        let text = extract_paragraphs(&html);
        log::debug!("Extracted {} characters from {}", text.len(), url);
        Ok(PageContent::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_paragraph_text() {
        let html = r#"<html><head><title>T</title></head><body>
            <nav>Menu</nav>
            <p>First   paragraph with <b>bold</b> text.</p>
            <div>Not a paragraph</div>
            <p>   </p>
            <p>Second
               paragraph.</p>
        </body></html>"#;
        assert_eq!(
            extract_paragraphs(html),
            "First paragraph with bold text.\n\nSecond paragraph."
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(parse_page_url("https://example.com/a").is_ok());
        let err = parse_page_url("ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("Only HTTP and HTTPS"));
        assert!(parse_page_url("not a url").is_err());
    }
}
