use serde::{Deserialize, Serialize};

/// A single question/answer pair used for study display and quiz grading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered key points produced for a piece of source text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub bullets: Vec<String>,
}

/// List markers that only count when followed by whitespace
const SPACED_MARKERS: [char; 2] = ['-', '*'];

fn strip_bullet_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('•') {
        return rest.trim_start();
    }
    line.strip_prefix(SPACED_MARKERS)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .map(str::trim_start)
        .unwrap_or(line)
}

impl Summary {
    pub fn new(bullets: Vec<String>) -> Self {
        Self { bullets }
    }

    /// Parse a newline-delimited bullet string. Blank lines are dropped and a
    /// single leading bullet marker (`•`, or `-`/`*` followed by a space) is
    /// stripped from each line.
    pub fn from_text(text: &str) -> Self {
        let bullets = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| strip_bullet_marker(line).to_string())
            .filter(|line| !line.is_empty())
            .collect();

        Self { bullets }
    }

    /// Render in the wire format: one `• ` prefixed line per bullet
    pub fn to_text(&self) -> String {
        self.bullets
            .iter()
            .map(|b| format!("• {}", b))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

/// Ordered flashcards generated from one piece of source text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlashcardDeck {
    pub cards: Vec<Flashcard>,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Which path produced a generated result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Remote,
    Fallback,
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Remote => write!(f, "remote"),
            ContentSource::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<T> {
    pub content: T,
    pub source: ContentSource,
}

/// One answered question in the review log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    NotStarted,
    InProgress,
    Complete,
}

impl std::fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizPhase::NotStarted => write!(f, "not_started"),
            QuizPhase::InProgress => write!(f, "in_progress"),
            QuizPhase::Complete => write!(f, "complete"),
        }
    }
}

/// Read-only snapshot of a quiz session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizState {
    pub cards: Vec<Flashcard>,
    pub current_index: usize,
    pub score: usize,
    pub attempts: Vec<QuizAttempt>,
    pub phase: QuizPhase,
}
