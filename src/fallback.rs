//! Deterministic local content used when the remote endpoint is unavailable.
//!
//! The generator picks one of two curated content sets by scanning the source
//! text for web-API vocabulary. Output depends only on the input string.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{Flashcard, FlashcardDeck, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    WebApi,
    General,
}

static WEB_API_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(REST|HTTP|URI|endpoints?|status\s*codes?|JWT|OAuth|idempot\w*|pagination|versioning|resources?)\b",
    )
    .expect("web API vocabulary pattern is valid")
});

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]+").expect("word separator pattern is valid"));

const WEB_API_BULLETS: [&str; 7] = [
    "Design endpoints around resources with clear, noun-based URIs.",
    "Use standard HTTP methods: GET, POST, PUT, PATCH, DELETE.",
    "Return meaningful status codes and consistent error bodies.",
    "Support pagination, filtering, and sorting for collections.",
    "Ensure idempotency for PUT/DELETE; use PATCH for partial updates.",
    "Secure with JWT/OAuth; never expose secrets in URLs.",
    "Version your API and document breaking changes clearly.",
];

const WEB_API_CARDS: [(&str, &str); 6] = [
    (
        "What is a REST resource?",
        "A conceptual object or collection exposed via a URI, manipulated with standard HTTP methods.",
    ),
    (
        "When to use PUT vs PATCH?",
        "PUT is idempotent full replacement; PATCH is for partial updates.",
    ),
    (
        "Why version an API?",
        "To introduce breaking changes without impacting existing clients.",
    ),
    (
        "How to handle large lists?",
        "Use pagination (limit/offset or cursor) with filtering and sorting.",
    ),
    (
        "Which status codes are common?",
        "200/201/204 success, 400/401/403 client errors, 404 not found, 409 conflict, 500 server error.",
    ),
    (
        "How to secure endpoints?",
        "Use JWT/OAuth; validate and sanitize inputs; enforce least privilege.",
    ),
];

const GENERAL_BULLETS: [&str; 3] = [
    "AI simulates human-like intelligence (language, patterns, decisions, learning).",
    "Modern AI uses machine learning and deep learning on data to generalize.",
    "Responsible AI focuses on fairness, transparency, and privacy.",
];

const GENERAL_CARDS: [(&str, &str); 4] = [
    (
        "What is Artificial Intelligence (AI)?",
        "A field of computer science that enables systems to perform tasks that typically require human intelligence.",
    ),
    (
        "Name two techniques used in modern AI.",
        "Machine Learning and Deep Learning.",
    ),
    (
        "What are pillars of Responsible AI?",
        "Fairness, transparency, and privacy.",
    ),
    (
        "Why are datasets important for AI?",
        "They enable models to learn patterns and generalize to new examples.",
    ),
];

const KEY_CONCEPT_LIMIT: usize = 3;
const KEY_CONCEPT_MIN_LEN: usize = 7;
const KEY_CONCEPT_PLACEHOLDER: &str = "models, data, learning";

pub fn classify_topic(text: &str) -> Topic {
    if WEB_API_VOCABULARY.is_match(text) {
        Topic::WebApi
    } else {
        Topic::General
    }
}

pub fn local_summary(text: &str) -> Summary {
    match classify_topic(text) {
        Topic::WebApi => Summary::new(owned(&WEB_API_BULLETS)),
        Topic::General => {
            let mut bullets = owned(&GENERAL_BULLETS);
            let words = key_concepts(text);
            let concepts = if words.is_empty() {
                KEY_CONCEPT_PLACEHOLDER.to_string()
            } else {
                words.join(", ")
            };
            bullets.push(format!("Key concepts: {}.", concepts));
            Summary::new(bullets)
        }
    }
}

pub fn local_flashcards(text: &str) -> FlashcardDeck {
    let pairs: &[(&str, &str)] = match classify_topic(text) {
        Topic::WebApi => &WEB_API_CARDS,
        Topic::General => &GENERAL_CARDS,
    };

    FlashcardDeck::new(
        pairs
            .iter()
            .map(|(question, answer)| Flashcard::new(*question, *answer))
            .collect(),
    )
}

/// First alphabetic runs longer than six letters, in order of appearance
fn key_concepts(text: &str) -> Vec<&str> {
    NON_LETTERS
        .split(text)
        .filter(|word| word.len() >= KEY_CONCEPT_MIN_LEN)
        .take(KEY_CONCEPT_LIMIT)
        .collect()
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
