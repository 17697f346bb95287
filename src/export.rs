use serde::Serialize;

use crate::models::{Flashcard, FlashcardDeck};

#[derive(Serialize)]
struct DeckExport<'a> {
    flashcards: &'a [Flashcard],
}

/// Plain-text export: a `Qn:`/`An:` block per card separated by blank lines
pub fn to_text(deck: &FlashcardDeck) -> String {
    deck.cards
        .iter()
        .enumerate()
        .map(|(i, card)| format!("Q{n}: {}\nA{n}: {}\n", card.question, card.answer, n = i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON export under a `flashcards` key
pub fn to_json(deck: &FlashcardDeck) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DeckExport {
        flashcards: &deck.cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::parse_deck_body;

    fn sample() -> FlashcardDeck {
        FlashcardDeck::new(vec![
            Flashcard::new("2+2?", "4"),
            Flashcard::new("Capital of France?", "Paris"),
        ])
    }

    #[test]
    fn test_text_export() {
        assert_eq!(
            to_text(&sample()),
            "Q1: 2+2?\nA1: 4\n\nQ2: Capital of France?\nA2: Paris\n"
        );
        assert_eq!(to_text(&FlashcardDeck::default()), "");
    }

    #[test]
    fn test_json_export_layout() {
        let json = to_json(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"flashcards\": [\n    {\n      \"question\": \"2+2?\""));
    }

    #[test]
    fn test_json_export_is_accepted_as_a_deck_response() {
        let json = to_json(&sample()).unwrap();
        assert_eq!(parse_deck_body(&json).unwrap(), sample());
    }
}
