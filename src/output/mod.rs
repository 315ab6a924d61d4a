// src/output/mod.rs
//! Exports, split into a pure planning step and an I/O delivery step.

mod clipboard;
mod csv;
mod plan;
mod types;
mod writer;

pub use clipboard::copy_to_clipboard;
pub use csv::flashcards_to_csv;
pub use plan::{
    plan_exports, summary_document, ExportSettings, FLASHCARDS_FILE_NAME, SUMMARY_FILE_NAME,
};
pub use types::{DeliveryTarget, FailedDelivery, OutputPlan, OutputReport};
pub use writer::{deliver, deliver_all};
