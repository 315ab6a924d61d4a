// src/extraction/mod.rs
//! Structured output recovery: turns free-form model text into typed lists.
//!
//! Extraction is all-or-nothing. One element that violates the schema
//! invalidates the whole list, and every failure is retryable upstream.

mod json_array;
mod schema;

pub use json_array::locate_array;
pub use schema::{ArtifactSchema, FlashcardSchema, McqSchema, MCQ_CHOICE_COUNT};

use crate::error::ExtractionError;

/// Extracts and validates the JSON array embedded in `raw` against `S`.
pub fn extract<S: ArtifactSchema>(raw: &str) -> Result<Vec<S::Item>, ExtractionError> {
    let elements = locate_array(raw)?;

    for (index, element) in elements.iter().enumerate() {
        S::check(element).map_err(|reason| ExtractionError::SchemaViolation {
            schema: S::NAME,
            index,
            reason,
        })?;
    }

    let items = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element).map_err(|e| ExtractionError::SchemaViolation {
                schema: S::NAME,
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<S::Item>, _>>()?;

    log::debug!("Extracted {} {} item(s)", items.len(), S::NAME);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Flashcard, McqItem};
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_mcqs_from_fenced_output() {
        let raw = r#"Here are your questions:
```json
[
  {"question": "Capital of France?", "choices": ["A. Paris", "B. Rome", "C. Madrid", "D. Berlin"], "answer": "A"}
]
```"#;
        let items = extract::<McqSchema>(raw).unwrap();
        assert_eq!(
            items,
            vec![McqItem {
                question: "Capital of France?".to_string(),
                choices: vec![
                    "A. Paris".to_string(),
                    "B. Rome".to_string(),
                    "C. Madrid".to_string(),
                    "D. Berlin".to_string(),
                ],
                answer: "A".to_string(),
            }]
        );
    }

    #[test]
    fn one_bad_element_rejects_the_list() {
        let raw = r#"[{"front": "ok", "back": "ok"}, {"front": "missing back"}]"#;
        assert_eq!(
            extract::<FlashcardSchema>(raw),
            Err(ExtractionError::SchemaViolation {
                schema: "Flashcard",
                index: 1,
                reason: "missing field `back`".to_string(),
            })
        );
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let raw = r#"[{"front": "f", "back": "b", "hint": "h"}]"#;
        assert_eq!(
            extract::<FlashcardSchema>(raw).unwrap(),
            vec![Flashcard::new("f", "b")]
        );
    }

    #[test]
    fn empty_array_is_a_valid_empty_list() {
        assert_eq!(extract::<McqSchema>("[]").unwrap(), Vec::<McqItem>::new());
    }
}
