// src/api/mod.rs
//! Network-facing collaborators: the local model server behind the
//! capability contract, and the page fetcher used for comparisons.

pub mod client;
pub mod local_model;
pub mod page_fetcher;
mod responses;

pub use client::LocalModelClient;
pub use local_model::LocalModel;
pub use page_fetcher::{extract_paragraphs, parse_page_url, HttpPageFetcher};
