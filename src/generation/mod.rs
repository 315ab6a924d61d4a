// src/generation/mod.rs
//! Generative capability access shared by the summary and every artifact.

mod adapter;

pub use adapter::GenerativeAdapter;
