// src/extraction/json_array.rs
//! Locates the JSON array embedded in free-form model output.

use crate::constants::OUTPUT_PREVIEW_LENGTH;
use crate::error::ExtractionError;
use serde_json::Value;

/// Parses the text between the first `[` and the last `]` of `raw`.
///
/// Models wrap their JSON in prose or code fences; anything outside the
/// outermost brackets is ignored.
pub fn locate_array(raw: &str) -> Result<Vec<Value>, ExtractionError> {
    let start = raw.find('[').ok_or(ExtractionError::NoArrayFound)?;
    let end = raw.rfind(']').ok_or(ExtractionError::NoArrayFound)?;

    if end < start {
        return Err(ExtractionError::MalformedJson {
            reason: "closing bracket precedes opening bracket".to_string(),
            fragment: String::new(),
        });
    }

    let fragment = &raw[start..=end];
    match serde_json::from_str::<Value>(fragment) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(ExtractionError::MalformedJson {
            reason: format!("expected an array, found {}", json_kind(&other)),
            fragment: preview(fragment),
        }),
        Err(e) => {
            log::warn!("Extracted JSON invalid: {}", preview(fragment));
            Err(ExtractionError::MalformedJson {
                reason: e.to_string(),
                fragment: preview(fragment),
            })
        }
    }
}

/// Name of a JSON value's type for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn preview(fragment: &str) -> String {
    match fragment.char_indices().nth(OUTPUT_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}…", &fragment[..cut]),
        None => fragment.to_string(),
    }
}
