//! Self-graded quiz over a flashcard deck.
//!
//! The session moves `NotStarted -> InProgress -> Complete`. Within
//! `InProgress` each card must be answered exactly once before advancing.
//! Operations outside their valid phase return [`QuizError`] and leave the
//! session untouched.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::{QuizError, ValidationError};
use crate::evaluator::evaluate;
use crate::models::{Flashcard, QuizAttempt, QuizPhase, QuizState};

use crate::log_quiz_event;

/// Feedback tier for a finished quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Performance {
    Excellent,
    Good,
    KeepStudying,
}

impl Performance {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            80.. => Performance::Excellent,
            60..=79 => Performance::Good,
            _ => Performance::KeepStudying,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Excellent => "Excellent work!",
            Performance::Good => "Good job! Keep practicing!",
            Performance::KeepStudying => "Keep studying! You'll get better!",
        }
    }
}

/// Final results of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizReport {
    pub score: usize,
    pub total: usize,
    pub percent: u32,
    pub performance: Performance,
    pub attempts: Vec<QuizAttempt>,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    run_id: Uuid,
    cards: Vec<Flashcard>,
    current_index: usize,
    score: usize,
    attempts: Vec<QuizAttempt>,
    phase: QuizPhase,
    answered: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// An empty session waiting for a deck
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            cards: Vec::new(),
            current_index: 0,
            score: 0,
            attempts: Vec::new(),
            phase: QuizPhase::NotStarted,
            answered: false,
        }
    }

    /// Start a new run over `cards`. An empty deck leaves the session in
    /// `NotStarted`.
    pub fn load(&mut self, cards: Vec<Flashcard>) -> QuizPhase {
        self.run_id = Uuid::new_v4();
        self.reset_progress();

        if cards.is_empty() {
            self.cards = Vec::new();
            self.phase = QuizPhase::NotStarted;
        } else {
            self.cards = cards;
            self.phase = QuizPhase::InProgress;
        }

        log_quiz_event!(transition, "load", run_id = self.run_id, phase = self.phase);
        self.phase
    }

    /// Grade `text` against the current card and record the attempt.
    ///
    /// Does not move to the next card; call [`QuizSession::advance`] for that.
    pub fn submit_answer(&mut self, text: &str) -> Result<&QuizAttempt, QuizError> {
        if let Err(e) = self.check_can_submit(text) {
            log_quiz_event!(rejected, "submit_answer", run_id = self.run_id, error = e);
            return Err(e);
        }

        let card = &self.cards[self.current_index];
        let is_correct = evaluate(text, &card.answer);
        self.attempts.push(QuizAttempt {
            question: card.question.clone(),
            user_answer: text.to_string(),
            correct_answer: card.answer.clone(),
            is_correct,
        });
        if is_correct {
            self.score += 1;
        }
        self.answered = true;

        log_quiz_event!(
            answered,
            run_id = self.run_id,
            index = self.current_index,
            correct = is_correct,
            score = self.score
        );

        Ok(&self.attempts[self.attempts.len() - 1])
    }

    /// Move past the answered current card, completing the run after the last one
    pub fn advance(&mut self) -> Result<QuizPhase, QuizError> {
        if self.phase != QuizPhase::InProgress {
            let e = QuizError::invalid("advance", self.phase, "quiz is not in progress");
            log_quiz_event!(rejected, "advance", run_id = self.run_id, error = e);
            return Err(e);
        }
        if !self.answered {
            let e = QuizError::invalid("advance", self.phase, "current question has not been answered");
            log_quiz_event!(rejected, "advance", run_id = self.run_id, error = e);
            return Err(e);
        }

        if self.current_index + 1 >= self.cards.len() {
            self.phase = QuizPhase::Complete;
        } else {
            self.current_index += 1;
            self.answered = false;
        }

        log_quiz_event!(transition, "advance", run_id = self.run_id, phase = self.phase);
        Ok(self.phase)
    }

    /// Run the same deck again from the first card
    pub fn restart(&mut self) -> Result<QuizPhase, QuizError> {
        if self.phase == QuizPhase::NotStarted {
            let e = QuizError::invalid("restart", self.phase, "no deck has been loaded");
            log_quiz_event!(rejected, "restart", run_id = self.run_id, error = e);
            return Err(e);
        }

        self.reset_progress();
        self.phase = QuizPhase::InProgress;

        log_quiz_event!(transition, "restart", run_id = self.run_id, phase = self.phase);
        Ok(self.phase)
    }

    fn reset_progress(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.attempts.clear();
        self.answered = false;
    }

    fn check_can_submit(&self, text: &str) -> Result<(), QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::invalid("submit_answer", self.phase, "quiz is not in progress"));
        }
        if self.answered {
            return Err(QuizError::invalid(
                "submit_answer",
                self.phase,
                "current question was already answered",
            ));
        }
        if text.trim().is_empty() {
            return Err(ValidationError::BlankAnswer.into());
        }
        Ok(())
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether the current card has been answered in this pass
    pub fn is_answered(&self) -> bool {
        self.phase == QuizPhase::InProgress && self.answered
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        match self.phase {
            QuizPhase::InProgress => self.cards.get(self.current_index),
            _ => None,
        }
    }

    /// The attempt for the current card, once it has been answered
    pub fn last_attempt(&self) -> Option<&QuizAttempt> {
        if self.is_answered() { self.attempts.last() } else { None }
    }

    /// Review log of every answer given in this run, in order
    pub fn review(&self) -> &[QuizAttempt] {
        &self.attempts
    }

    pub fn state(&self) -> QuizState {
        QuizState {
            cards: self.cards.clone(),
            current_index: self.current_index,
            score: self.score,
            attempts: self.attempts.clone(),
            phase: self.phase,
        }
    }

    /// Position through the deck, counting the current card
    pub fn progress_percent(&self) -> Option<f64> {
        match self.phase {
            QuizPhase::InProgress => {
                Some(100.0 * (self.current_index + 1) as f64 / self.cards.len() as f64)
            }
            _ => None,
        }
    }

    /// Rounded share of correct answers once the run is complete
    pub fn final_percent(&self) -> Option<u32> {
        match self.phase {
            QuizPhase::Complete => {
                Some((100.0 * self.score as f64 / self.cards.len() as f64).round() as u32)
            }
            _ => None,
        }
    }

    pub fn report(&self) -> Option<QuizReport> {
        let percent = self.final_percent()?;
        Some(QuizReport {
            score: self.score,
            total: self.cards.len(),
            percent,
            performance: Performance::from_percent(percent),
            attempts: self.attempts.clone(),
        })
    }
}
