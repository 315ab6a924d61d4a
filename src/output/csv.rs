// src/output/csv.rs
//! Flashcard export as two-column CSV.

use crate::types::Flashcard;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One `"front","back"` line per card, every field quoted.
pub fn flashcards_to_csv(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .map(|card| format!("{},{}\n", quote(&card.front), quote(&card.back)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_doubled() {
        let cards = vec![
            Flashcard::new("What is H2O?", "Water"),
            Flashcard::new("Say \"hi\"", "a, b"),
        ];
        insta::assert_snapshot!(flashcards_to_csv(&cards).trim_end(), @r###"
        "What is H2O?","Water"
        "Say ""hi""","a, b"
        "###);
    }

    #[test]
    fn no_cards_is_empty() {
        assert_eq!(flashcards_to_csv(&[]), "");
    }
}
