//! Per-session quiz state.

use crate::models::{Bucket, Card};
use uuid::Uuid;

pub type SessionId = Uuid;

/// Where the current session is in the question/answer cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QuizState {
    /// No card held; the scheduler is consulted on the next cycle.
    #[default]
    Idle,
    /// Card shown, answer hidden.
    Question { bucket: Bucket, card: Card },
    /// Answer revealed, awaiting a judgment.
    Answer { bucket: Bucket, card: Card },
}

/// Transient state for one user session. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub id: SessionId,
    pub state: QuizState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: QuizState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, QuizState::Idle)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, QuizState::Answer { .. })
    }

    /// The held card and the bucket it was drawn from.
    pub fn current(&self) -> Option<(Bucket, &Card)> {
        match &self.state {
            QuizState::Idle => None,
            QuizState::Question { bucket, card } | QuizState::Answer { bucket, card } => {
                Some((*bucket, card))
            }
        }
    }

    /// Hold a due card. Ignored unless idle; the card stays held until resolved.
    pub fn offer(&mut self, bucket: Bucket, card: Card) -> bool {
        if !self.is_idle() {
            return false;
        }
        tracing::debug!(session = %self.id, sentence = %card.sentence, bucket = bucket.name(), "showing card");
        self.state = QuizState::Question { bucket, card };
        true
    }

    /// Reveal the answer of the held card.
    pub fn reveal(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            QuizState::Question { bucket, card } => {
                self.state = QuizState::Answer { bucket, card };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Release the held card once a judgment is made, returning to idle.
    pub fn resolve(&mut self) -> Option<(Bucket, Card)> {
        match std::mem::take(&mut self.state) {
            QuizState::Answer { bucket, card } => Some((bucket, card)),
            other => {
                self.state = other;
                None
            }
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
