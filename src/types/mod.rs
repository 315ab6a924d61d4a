//! Domain types shared across the crate, and their validation errors.

use thiserror::Error;

mod artifacts;
mod content;
mod options;

pub use artifacts::*;
pub use content::*;
pub use options::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: usize, min: usize, max: usize },

    #[error("Invalid model name: {name} - {reason}")]
    InvalidModelName { name: String, reason: String },

    #[error("Unknown {field} value: {value}")]
    UnknownVariant { field: &'static str, value: String },
}
