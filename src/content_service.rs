use std::time::Instant;
use tracing::debug;

use crate::errors::ValidationError;
use crate::fallback;
use crate::models::{ContentSource, FlashcardDeck, Generated, Summary};
use crate::remote::ContentBackend;

use crate::{log_generation, log_validation};

/// Produces summaries and flashcard decks from source text.
///
/// The remote backend is always tried first. Any remote failure is logged
/// and answered with the deterministic local generator, so the only error a
/// caller can see is a rejected (blank) input.
pub struct ContentGenerationService {
    backend: Box<dyn ContentBackend>,
}

impl ContentGenerationService {
    pub fn new(backend: Box<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn summarize(&self, source_text: &str) -> Result<Generated<Summary>, ValidationError> {
        validate_source(source_text)?;
        log_generation!(start, "summarize", text_length = source_text.len());
        let started = Instant::now();

        let generated = match self.backend.summarize(source_text).await {
            Ok(summary) => Generated {
                content: summary,
                source: ContentSource::Remote,
            },
            Err(e) => {
                log_generation!(remote_failed, "summarize", backend = self.backend.name(), error = e);
                Generated {
                    content: fallback::local_summary(source_text),
                    source: ContentSource::Fallback,
                }
            }
        };

        log_generation!(
            success,
            "summarize",
            source = generated.source,
            items = generated.content.bullets.len()
        );
        debug!(duration_ms = started.elapsed().as_millis() as u64, "Summary ready");
        Ok(generated)
    }

    pub async fn generate_flashcards(
        &self,
        source_text: &str,
    ) -> Result<Generated<FlashcardDeck>, ValidationError> {
        validate_source(source_text)?;
        log_generation!(start, "flashcards", text_length = source_text.len());
        let started = Instant::now();

        let generated = match self.backend.flashcards(source_text).await {
            Ok(deck) => Generated {
                content: deck,
                source: ContentSource::Remote,
            },
            Err(e) => {
                log_generation!(remote_failed, "flashcards", backend = self.backend.name(), error = e);
                Generated {
                    content: fallback::local_flashcards(source_text),
                    source: ContentSource::Fallback,
                }
            }
        };

        log_generation!(
            success,
            "flashcards",
            source = generated.source,
            items = generated.content.len()
        );
        debug!(duration_ms = started.elapsed().as_millis() as u64, "Flashcards ready");
        Ok(generated)
    }
}

fn validate_source(source_text: &str) -> Result<(), ValidationError> {
    if source_text.trim().is_empty() {
        let err = ValidationError::EmptySourceText;
        log_validation!(failure, "source_text", error = err);
        return Err(err);
    }
    Ok(())
}
