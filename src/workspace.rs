use crate::content_service::ContentGenerationService;
use crate::errors::ValidationError;
use crate::models::{FlashcardDeck, Generated, Summary};
use crate::quiz::QuizSession;
use crate::sequencing::LatestSlot;

use crate::log_generation;

/// Outcome of a generation request issued through the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome<T> {
    pub sequence: u64,
    pub result: Generated<T>,
    /// False when a later request had already published its result
    pub applied: bool,
}

/// One interactive study session: the latest visible summary and deck, and
/// the quiz built from that deck.
///
/// Requests may overlap. Each takes a sequence number when it is issued and
/// only the most recently issued request that has finished is visible.
pub struct StudyWorkspace {
    service: ContentGenerationService,
    summary: LatestSlot<Generated<Summary>>,
    deck: LatestSlot<Generated<FlashcardDeck>>,
}

impl StudyWorkspace {
    pub fn new(service: ContentGenerationService) -> Self {
        Self {
            service,
            summary: LatestSlot::new(),
            deck: LatestSlot::new(),
        }
    }

    pub async fn request_summary(
        &self,
        source_text: &str,
    ) -> Result<RequestOutcome<Summary>, ValidationError> {
        let sequence = self.summary.issue();
        log_generation!(start, "summarize", sequence = sequence, text_length = source_text.len());

        let result = self.service.summarize(source_text).await?;
        let applied = self.summary.publish(sequence, result.clone()).await;
        if !applied {
            let latest = self.summary.current_sequence().await;
            log_generation!(stale, "summarize", sequence = sequence, latest = latest);
        }

        Ok(RequestOutcome {
            sequence,
            result,
            applied,
        })
    }

    pub async fn request_flashcards(
        &self,
        source_text: &str,
    ) -> Result<RequestOutcome<FlashcardDeck>, ValidationError> {
        let sequence = self.deck.issue();
        log_generation!(start, "flashcards", sequence = sequence, text_length = source_text.len());

        let result = self.service.generate_flashcards(source_text).await?;
        let applied = self.deck.publish(sequence, result.clone()).await;
        if !applied {
            let latest = self.deck.current_sequence().await;
            log_generation!(stale, "flashcards", sequence = sequence, latest = latest);
        }

        Ok(RequestOutcome {
            sequence,
            result,
            applied,
        })
    }

    pub async fn latest_summary(&self) -> Option<Generated<Summary>> {
        self.summary.current().await
    }

    pub async fn latest_deck(&self) -> Option<Generated<FlashcardDeck>> {
        self.deck.current().await
    }

    /// A quiz over the visible deck. Without a deck the quiz stays `NotStarted`.
    pub async fn start_quiz(&self) -> QuizSession {
        let mut session = QuizSession::new();
        let cards = self
            .latest_deck()
            .await
            .map(|generated| generated.content.cards)
            .unwrap_or_default();
        session.load(cards);
        session
    }
}
