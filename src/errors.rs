use crate::models::QuizPhase;

/// Failures of the remote content-generation endpoint.
///
/// These never reach callers of the content service: every variant is logged
/// and answered by the local fallback generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("response contained no usable flashcards")]
    EmptyDeck,

    #[error("response contained no summary bullets")]
    EmptySummary,
}

impl GenerationError {
    /// Short label used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Transport(_) => "transport",
            GenerationError::Status { .. } => "status",
            GenerationError::Malformed(_) => "malformed",
            GenerationError::EmptyDeck => "empty_deck",
            GenerationError::EmptySummary => "empty_summary",
        }
    }
}

/// Input rejected before any work is done
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("source text must not be empty")]
    EmptySourceText,

    #[error("answer must not be blank")]
    BlankAnswer,
}

/// Rejected quiz operations. The session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("cannot {operation} while quiz is {phase}: {reason}")]
    InvalidTransition {
        operation: &'static str,
        phase: QuizPhase,
        reason: &'static str,
    },
}

impl QuizError {
    pub(crate) fn invalid(operation: &'static str, phase: QuizPhase, reason: &'static str) -> Self {
        QuizError::InvalidTransition {
            operation,
            phase,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_kinds() {
        let status = GenerationError::Status {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(status.kind(), "status");
        assert_eq!(status.to_string(), "endpoint returned 503: unavailable");
        assert_eq!(GenerationError::EmptyDeck.kind(), "empty_deck");
        assert_eq!(GenerationError::Malformed("eof".to_string()).kind(), "malformed");
    }

    #[test]
    fn test_quiz_error_messages() {
        let err = QuizError::invalid("advance", QuizPhase::InProgress, "current question not answered");
        assert_eq!(
            err.to_string(),
            "cannot advance while quiz is in_progress: current question not answered"
        );

        let err: QuizError = ValidationError::BlankAnswer.into();
        assert!(matches!(err, QuizError::Validation(ValidationError::BlankAnswer)));
    }
}
