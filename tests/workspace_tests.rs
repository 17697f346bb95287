use async_trait::async_trait;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Mutex;
use study_aid::fallback::local_flashcards;
use study_aid::{
    ContentBackend, ContentGenerationService, ContentSource, Flashcard, FlashcardDeck, GenerationError,
    QuizPhase, StudyWorkspace, Summary, ValidationError,
};
use tokio::sync::oneshot;

/// Backend whose responses are released by the test, one per input text.
///
/// A text mapped to `Ok` resolves with that content; a text mapped to `Err`
/// fails so the service falls back to the local generator.
struct GatedBackend {
    summaries: Mutex<HashMap<String, oneshot::Receiver<Result<Summary, GenerationError>>>>,
    decks: Mutex<HashMap<String, oneshot::Receiver<Result<FlashcardDeck, GenerationError>>>>,
}

impl GatedBackend {
    fn new() -> Self {
        Self {
            summaries: Mutex::new(HashMap::new()),
            decks: Mutex::new(HashMap::new()),
        }
    }

    fn gate_summary(&self, text: &str) -> oneshot::Sender<Result<Summary, GenerationError>> {
        let (tx, rx) = oneshot::channel();
        self.summaries.lock().unwrap().insert(text.to_string(), rx);
        tx
    }

    fn gate_deck(&self, text: &str) -> oneshot::Sender<Result<FlashcardDeck, GenerationError>> {
        let (tx, rx) = oneshot::channel();
        self.decks.lock().unwrap().insert(text.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ContentBackend for GatedBackend {
    async fn summarize(&self, text: &str) -> Result<Summary, GenerationError> {
        let rx = self.summaries.lock().unwrap().remove(text);
        match rx {
            Some(rx) => rx.await.unwrap_or(Err(GenerationError::EmptySummary)),
            None => Err(GenerationError::EmptySummary),
        }
    }

    async fn flashcards(&self, text: &str) -> Result<FlashcardDeck, GenerationError> {
        let rx = self.decks.lock().unwrap().remove(text);
        match rx {
            Some(rx) => rx.await.unwrap_or(Err(GenerationError::EmptyDeck)),
            None => Err(GenerationError::EmptyDeck),
        }
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

fn remote_deck(question: &str) -> FlashcardDeck {
    FlashcardDeck::new(vec![Flashcard::new(question, "answer")])
}

#[tokio::test]
async fn test_stale_fallback_does_not_overwrite_newer_remote_result() {
    let backend = GatedBackend::new();
    let older = backend.gate_deck("older REST text");
    let newer = backend.gate_deck("newer text");
    let workspace = StudyWorkspace::new(ContentGenerationService::new(Box::new(backend)));

    let first = workspace.request_flashcards("older REST text");
    let second = workspace.request_flashcards("newer text");

    let release = async {
        // The newer request resolves first with a remote deck, then the
        // older one fails and resolves through the fallback.
        newer.send(Ok(remote_deck("newer?"))).unwrap();
        while workspace.latest_deck().await.is_none() {
            tokio::task::yield_now().await;
        }
        older.send(Err(GenerationError::EmptyDeck)).unwrap();
    };

    let (first, second, ()) = tokio::join!(first, second, release);
    let first = first.unwrap();
    let second = second.unwrap();

    assert!(first.sequence < second.sequence);
    assert!(second.applied);
    assert!(!first.applied);
    assert_eq!(first.result.source, ContentSource::Fallback);
    assert_eq!(first.result.content, local_flashcards("older REST text"));

    let visible = workspace.latest_deck().await.unwrap();
    assert_eq!(visible.source, ContentSource::Remote);
    assert_eq!(visible.content, remote_deck("newer?"));
}

#[tokio::test]
async fn test_in_order_resolution_shows_latest() {
    let backend = GatedBackend::new();
    let a = backend.gate_summary("a");
    let b = backend.gate_summary("b");
    let workspace = StudyWorkspace::new(ContentGenerationService::new(Box::new(backend)));

    let release = async {
        a.send(Ok(Summary::new(vec!["from a".to_string()]))).unwrap();
        while workspace.latest_summary().await.is_none() {
            tokio::task::yield_now().await;
        }
        b.send(Ok(Summary::new(vec!["from b".to_string()]))).unwrap();
    };

    let (ra, rb, ()) = tokio::join!(workspace.request_summary("a"), workspace.request_summary("b"), release);
    assert!(ra.unwrap().applied);
    assert!(rb.unwrap().applied);

    let visible = workspace.latest_summary().await.unwrap();
    assert_eq!(visible.content.bullets, vec!["from b"]);
}

#[tokio::test]
async fn test_many_overlapping_requests_keep_highest_sequence() {
    let backend = GatedBackend::new();
    let texts: Vec<String> = (0..5).map(|i| format!("text {i}")).collect();
    let gates: Vec<_> = texts.iter().map(|t| backend.gate_deck(t)).collect();
    let workspace = StudyWorkspace::new(ContentGenerationService::new(Box::new(backend)));

    let requests = join_all(texts.iter().map(|t| workspace.request_flashcards(t)));
    let release = async {
        // Resolve newest first, then let the rest finish in any order.
        let mut gates = gates;
        let newest = gates.pop().unwrap();
        newest.send(Ok(remote_deck("deck 4?"))).unwrap();
        while workspace.latest_deck().await.is_none() {
            tokio::task::yield_now().await;
        }
        for (i, gate) in gates.into_iter().enumerate() {
            gate.send(Ok(remote_deck(&format!("deck {i}?")))).unwrap();
        }
    };

    let (outcomes, ()) = tokio::join!(requests, release);
    let outcomes: Vec<_> = outcomes.into_iter().map(Result::unwrap).collect();

    let applied: Vec<_> = outcomes.iter().filter(|o| o.applied).collect();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].sequence, outcomes.iter().map(|o| o.sequence).max().unwrap());

    let visible = workspace.latest_deck().await.unwrap();
    assert_eq!(visible.content, remote_deck("deck 4?"));
}

#[tokio::test]
async fn test_blank_request_is_rejected_and_keeps_visible_state() {
    let backend = GatedBackend::new();
    let gate = backend.gate_deck("real text");
    gate.send(Ok(remote_deck("kept?"))).unwrap();
    let workspace = StudyWorkspace::new(ContentGenerationService::new(Box::new(backend)));

    workspace.request_flashcards("real text").await.unwrap();
    let err = workspace.request_flashcards("   ").await.unwrap_err();
    assert_eq!(err, ValidationError::EmptySourceText);

    let visible = workspace.latest_deck().await.unwrap();
    assert_eq!(visible.content, remote_deck("kept?"));
}

#[tokio::test]
async fn test_start_quiz_uses_visible_deck() {
    let workspace = StudyWorkspace::new(ContentGenerationService::new(Box::new(GatedBackend::new())));

    let empty = workspace.start_quiz().await;
    assert_eq!(empty.phase(), QuizPhase::NotStarted);

    workspace.request_flashcards("JWT and OAuth").await.unwrap();
    let session = workspace.start_quiz().await;
    assert_eq!(session.phase(), QuizPhase::InProgress);
    assert_eq!(session.cards(), local_flashcards("JWT and OAuth").cards.as_slice());
}
