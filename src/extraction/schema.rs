// src/extraction/schema.rs
//! Per-artifact schemas checked against each extracted element.

use super::json_array::json_kind;
use crate::types::{Flashcard, McqItem};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Number of choices every multiple-choice question must offer.
pub const MCQ_CHOICE_COUNT: usize = 4;

/// A structural contract for one element of an extracted array.
pub trait ArtifactSchema {
    type Item: DeserializeOwned;

    /// Name used in error messages.
    const NAME: &'static str;

    /// Checks a single element, describing the first violation found.
    fn check(element: &Value) -> Result<(), String>;
}

/// Multiple-choice questions: `question`, exactly four `choices`, `answer`.
pub struct McqSchema;

impl ArtifactSchema for McqSchema {
    type Item = McqItem;
    const NAME: &'static str = "MCQ";

    fn check(element: &Value) -> Result<(), String> {
        let object = as_object(element)?;
        require_string(object, "question")?;
        require_string(object, "answer")?;

        let choices = match object.get("choices") {
            Some(Value::Array(choices)) => choices,
            Some(other) => {
                return Err(format!(
                    "field `choices` must be an array, found {}",
                    json_kind(other)
                ))
            }
            None => return Err("missing field `choices`".to_string()),
        };

        if choices.len() != MCQ_CHOICE_COUNT {
            return Err(format!(
                "expected {} choices, found {}",
                MCQ_CHOICE_COUNT,
                choices.len()
            ));
        }

        if let Some(position) = choices.iter().position(|c| !c.is_string()) {
            return Err(format!("choice {} is not a string", position));
        }

        Ok(())
    }
}

/// Flashcards: string `front` and `back`.
pub struct FlashcardSchema;

impl ArtifactSchema for FlashcardSchema {
    type Item = Flashcard;
    const NAME: &'static str = "Flashcard";

    fn check(element: &Value) -> Result<(), String> {
        let object = as_object(element)?;
        require_string(object, "front")?;
        require_string(object, "back")
    }
}

fn as_object(element: &Value) -> Result<&Map<String, Value>, String> {
    element
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", json_kind(element)))
}

fn require_string(object: &Map<String, Value>, field: &str) -> Result<(), String> {
    match object.get(field) {
        Some(Value::String(_)) => Ok(()),
        Some(other) => Err(format!(
            "field `{}` must be a string, found {}",
            field,
            json_kind(other)
        )),
        None => Err(format!("missing field `{}`", field)),
    }
}
