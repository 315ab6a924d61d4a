// tests/extraction.rs
//! Recovering typed lists from free-form model output.

use pretty_assertions::assert_eq;
use study_assistant::extraction::locate_array;
use study_assistant::{extract, ExtractionError, Flashcard, FlashcardSchema, McqItem, McqSchema};

fn mcq(question: &str, answer: &str) -> McqItem {
    McqItem {
        question: question.to_string(),
        choices: vec![
            "A. one".to_string(),
            "B. two".to_string(),
            "C. three".to_string(),
            "D. four".to_string(),
        ],
        answer: answer.to_string(),
    }
}

#[test]
fn serialized_lists_survive_any_wrapping() {
    let items = vec![mcq("First?", "A"), mcq("Second?", "D")];
    let json = serde_json::to_string_pretty(&items).unwrap();

    for wrapped in [
        json.clone(),
        format!("Here you go:\n{}\nHope that helps!", json),
        format!("```json\n{}\n```", json),
        format!("Note: nothing bracketed before this. {}", json),
    ] {
        assert_eq!(extract::<McqSchema>(&wrapped).unwrap(), items);
    }
}

#[test]
fn output_without_brackets_has_no_array() {
    assert_eq!(
        extract::<FlashcardSchema>("I'd rather not.").unwrap_err(),
        ExtractionError::NoArrayFound
    );
}

#[test]
fn bracketed_prose_after_the_array_breaks_extraction() {
    let raw = r#"[{"front": "a", "back": "b"}] see [1]"#;
    assert!(matches!(
        extract::<FlashcardSchema>(raw),
        Err(ExtractionError::MalformedJson { .. })
    ));
}

#[test]
fn closing_bracket_before_opening_is_malformed() {
    assert!(matches!(
        locate_array("] then ["),
        Err(ExtractionError::MalformedJson { .. })
    ));
}

#[test]
fn one_bad_item_rejects_the_whole_list() {
    let raw = r#"[
        {"front": "Good", "back": "card"},
        {"front": "Bad"}
    ]"#;
    match extract::<FlashcardSchema>(raw) {
        Err(ExtractionError::SchemaViolation { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected a schema violation, got {:?}", other),
    }
}

#[test]
fn mcqs_need_exactly_four_string_choices() {
    let three = r#"[{"question": "Q", "choices": ["A", "B", "C"], "answer": "A"}]"#;
    let numeric = r#"[{"question": "Q", "choices": ["A", "B", "C", 4], "answer": "A"}]"#;
    assert!(extract::<McqSchema>(three).is_err());
    assert!(extract::<McqSchema>(numeric).is_err());
}

#[test]
fn empty_arrays_are_valid() {
    assert_eq!(extract::<FlashcardSchema>("[]").unwrap(), Vec::<Flashcard>::new());
}

#[test]
fn extra_fields_are_tolerated() {
    let raw = r#"[{"front": "F", "back": "B", "difficulty": "easy"}]"#;
    assert_eq!(
        extract::<FlashcardSchema>(raw).unwrap(),
        vec![Flashcard::new("F", "B")]
    );
}
