// src/constants.rs
//! Domain constants that define the operational boundaries of the assistant.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! these should tell you how much text the model accepts, how often a
//! generation is retried, and which literals travel through string-typed
//! channels in place of real output.

// ---------------------------------------------------------------------------
// Model boundaries
// ---------------------------------------------------------------------------

/// Maximum page characters handed to the summarizer.
///
/// The on-device model has a context of 1,024 tokens, 26 of which are taken
/// by its internal prompt. At roughly 4 characters per token, 4,000
/// characters is the largest input worth attempting.
pub const MAX_MODEL_CHARS: usize = 4000;

/// Retries after the first attempt for any derived-artifact generation.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

// ---------------------------------------------------------------------------
// String-channel literals
// ---------------------------------------------------------------------------

/// Stands in for "no usable output" wherever a summary string is expected.
pub const NOTHING_TO_SUMMARIZE: &str = "There's nothing to summarize...";

/// Prefix of every user-facing error string placed in the summary slot.
pub const ERROR_MARKER: &str = "Error";

/// Shown in the summary slot while a generation is pending.
pub const LOADING_MESSAGE: &str = "Loading...";

// ---------------------------------------------------------------------------
// Prompts (shared contexts)
// ---------------------------------------------------------------------------

/// Shared context for page summaries.
pub const SUMMARY_CONTEXT: &str =
    "You are summarizing a subject's content for a student, make it clear and concise.";

/// Shared context for multiple-choice question generation.
pub const MCQ_CONTEXT: &str = r#"You are a study assistant. Based on the provided summary, generate multiple choice questions in the following JSON format:

[
  {
    "question": "What is the capital of France?",
    "choices": ["A. Paris", "B. Rome", "C. Madrid", "D. Berlin"],
    "answer": "A"
  }
]

Only output raw JSON. Do not add any explanation, Markdown, or headings."#;

/// Shared context for flashcard generation.
pub const FLASHCARD_CONTEXT: &str = r#"You are a study assistant. Based on the provided summary, generate flashcards in the following JSON format:

[
  {
    "front": "What is the capital of France?",
    "back": "Paris"
  }
]

Only output raw JSON. Do not add any explanation, Markdown, or headings."#;

/// Shared context for keyword extraction over page content.
pub const KEYWORD_CONTEXT: &str = "You are a helpful assistant. Extract a list of the most important keywords or key phrases from the following content. Only return them as a plain comma-separated list. THEY MUST BE FROM THE CONTENT PROVIDED, AT LEAST 5 WORDS.";

/// Shared context for comparing two page summaries.
pub const COMPARISON_CONTEXT: &str = "comparing the two texts provided.";

/// Shared context for answering a follow-up question about the summary.
pub const FOLLOW_UP_CONTEXT: &str = "A student is asking a question based on your summary. Answer clearly. Do not summarize, only answer the question";

/// Writer instructions sent with follow-up answers.
pub const FOLLOW_UP_INSTRUCTIONS: &str = "Summarize the following text clearly for a student.";

// ---------------------------------------------------------------------------
// Local model server
// ---------------------------------------------------------------------------

/// Default base URL of the local model server.
pub const DEFAULT_MODEL_ENDPOINT: &str = "http://localhost:11434";

/// Default model tag requested from the local model server.
pub const DEFAULT_MODEL_NAME: &str = "gemma3:1b";

/// Maximum characters shown when previewing model output in logs and errors.
pub const OUTPUT_PREVIEW_LENGTH: usize = 200;
