use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use crate::credentials::Credentials;
use crate::errors::GenerationError;
use crate::models::{Flashcard, FlashcardDeck, Summary};

/// A source of generated study content
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<Summary, GenerationError>;

    async fn flashcards(&self, text: &str) -> Result<FlashcardDeck, GenerationError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Request body shared by both generation endpoints
#[derive(Debug, Clone, Serialize)]
struct GenerationRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct SummaryResponse {
    summary: String,
}

impl SummaryResponse {
    fn into_summary(self) -> Result<Summary, GenerationError> {
        let summary = Summary::from_text(&self.summary);
        if summary.is_empty() {
            return Err(GenerationError::EmptySummary);
        }
        Ok(summary)
    }
}

/// Deck payload as sent by the endpoint. The deck may arrive under either
/// `cards` or `flashcards`; `cards` wins when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckResponse {
    #[serde(default)]
    cards: Option<Vec<RawFlashcard>>,
    #[serde(default)]
    flashcards: Option<Vec<RawFlashcard>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFlashcard {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

impl DeckResponse {
    /// Normalize into the canonical deck, dropping cards without both sides
    pub fn into_deck(self) -> Result<FlashcardDeck, GenerationError> {
        let raw = self
            .cards
            .or(self.flashcards)
            .ok_or_else(|| GenerationError::Malformed("missing `cards` or `flashcards` field".to_string()))?;

        let cards: Vec<Flashcard> = raw
            .into_iter()
            .filter_map(|raw| match (raw.question, raw.answer) {
                (Some(q), Some(a)) if !q.trim().is_empty() && !a.trim().is_empty() => {
                    Some(Flashcard::new(q.trim(), a.trim()))
                }
                _ => None,
            })
            .collect();

        if cards.is_empty() {
            return Err(GenerationError::EmptyDeck);
        }
        Ok(FlashcardDeck::new(cards))
    }
}

/// Parse a flashcard response body into the canonical deck
pub fn parse_deck_body(body: &str) -> Result<FlashcardDeck, GenerationError> {
    serde_json::from_str::<DeckResponse>(body)
        .map_err(|e| GenerationError::Malformed(e.to_string()))?
        .into_deck()
}

/// Parse a summary response body
pub fn parse_summary_body(body: &str) -> Result<Summary, GenerationError> {
    serde_json::from_str::<SummaryResponse>(body)
        .map_err(|e| GenerationError::Malformed(e.to_string()))?
        .into_summary()
}

/// Content backend that calls the remote generation endpoints over HTTP
#[derive(Debug, Clone)]
pub struct HttpContentBackend {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl HttpContentBackend {
    pub fn new(base_url: &str, timeout: Duration, credentials: Credentials) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, text: &str) -> Result<String, GenerationError> {
        let url = format!("{}{}", self.base_url, path);

        info!(
            backend = self.name(),
            url = %url,
            text_length = text.len(),
            authenticated = self.credentials.token().is_some(),
            "Making generation request"
        );

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&GenerationRequest { text });

        if let Some(token) = self.credentials.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                backend = self.name(),
                status = %status,
                error = %body,
                "Generation request failed"
            );
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        info!(
            backend = self.name(),
            response_length = body.len(),
            "Received generation response"
        );
        Ok(body)
    }
}

#[async_trait]
impl ContentBackend for HttpContentBackend {
    async fn summarize(&self, text: &str) -> Result<Summary, GenerationError> {
        let body = self.post("/api/ai/summarize", text).await?;
        parse_summary_body(&body)
    }

    async fn flashcards(&self, text: &str) -> Result<FlashcardDeck, GenerationError> {
        let body = self.post("/api/ai/flashcards", text).await?;
        parse_deck_body(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
