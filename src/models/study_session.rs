//! Study session queue management.
//!
//! A session is built from a deck under one of two policies and advanced one
//! action at a time. Sessions never touch the deck: any card that changes is
//! handed back in [`Step::committed`] for the caller to merge and persist.

use super::sm2::{compute_next_review, select_due};
use super::{Card, Deck, Grade};
use crate::error::SessionError;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Which cards a session presents and how they are answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// Cards whose due date has arrived, in deck order, graded 0-5.
    #[default]
    DueDate,
    /// Cards not yet mastered, shuffled, with skip and master actions.
    Mastery,
}

impl SessionPolicy {
    pub fn label(self) -> &'static str {
        match self {
            SessionPolicy::DueDate => "due-date",
            SessionPolicy::Mastery => "mastery",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    /// Due-date session started with nothing due.
    NothingDue,
    /// Mastery session started with every card already mastered.
    AllMastered,
    /// Every queued card was handled.
    Complete,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        self != SessionStatus::InProgress
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    Flip,
    Grade(u8),
    Next,
    Skip,
    Master,
}

impl SessionAction {
    fn name(self) -> &'static str {
        match self {
            SessionAction::Flip => "flip",
            SessionAction::Grade(_) => "grade",
            SessionAction::Next => "next",
            SessionAction::Skip => "skip",
            SessionAction::Master => "master",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudySession {
    deck_id: String,
    deck_name: String,
    policy: SessionPolicy,
    queue: Vec<Card>,
    deferred: Vec<Card>,
    current_index: usize,
    revealed: bool,
    status: SessionStatus,
    round_number: usize,
    completed: usize,
}

/// Result of advancing a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub session: StudySession,
    /// Card to merge into the deck and persist, if the action changed one.
    pub committed: Option<Card>,
}

/// Builds the initial queue for a deck.
///
/// `rng` drives the mastery-mode shuffle; pass a seeded generator for a
/// reproducible order.
pub fn build_queue<R: Rng + ?Sized>(
    deck: &Deck,
    policy: SessionPolicy,
    now: DateTime<Utc>,
    rng: &mut R,
) -> StudySession {
    let (queue, empty_status) = match policy {
        SessionPolicy::DueDate => (select_due(&deck.cards, now), SessionStatus::NothingDue),
        SessionPolicy::Mastery => {
            let mut eligible: Vec<Card> =
                deck.cards.iter().filter(|c| !c.mastered).cloned().collect();
            eligible.shuffle(rng);
            (eligible, SessionStatus::AllMastered)
        }
    };

    let status = if queue.is_empty() {
        empty_status
    } else {
        SessionStatus::InProgress
    };

    log::debug!(
        "Built {} session for deck '{}' with {} cards",
        policy.label(),
        deck.name,
        queue.len()
    );

    StudySession {
        deck_id: deck.id.clone(),
        deck_name: deck.name.clone(),
        policy,
        queue,
        deferred: Vec::new(),
        current_index: 0,
        revealed: false,
        status,
        round_number: 1,
        completed: 0,
    }
}

/// Applies one user action and returns the next session state.
pub fn advance(
    session: StudySession,
    action: SessionAction,
    now: DateTime<Utc>,
) -> Result<Step, SessionError> {
    if session.status.is_finished() {
        return Err(SessionError::Finished);
    }

    let supported = matches!(
        (session.policy, action),
        (_, SessionAction::Flip)
            | (SessionPolicy::DueDate, SessionAction::Grade(_))
            | (
                SessionPolicy::Mastery,
                SessionAction::Next | SessionAction::Skip | SessionAction::Master
            )
    );
    if !supported {
        return Err(SessionError::UnsupportedAction {
            action: action.name(),
            policy: session.policy.label(),
        });
    }

    if action == SessionAction::Flip {
        return Ok(Step {
            session: StudySession {
                revealed: true,
                ..session
            },
            committed: None,
        });
    }

    if !session.revealed {
        return Err(SessionError::NotRevealed(action.name()));
    }

    // The queue is non-empty while the session is in progress
    let Some(current) = session.current_card().cloned() else {
        return Err(SessionError::Finished);
    };

    let (committed, deferred_card) = match action {
        SessionAction::Grade(value) => {
            let grade = Grade::new(value)?;
            (Some(compute_next_review(&current, grade, now)?), None)
        }
        SessionAction::Skip => (None, Some(current)),
        SessionAction::Master => (Some(current.as_mastered()), None),
        _ => (None, None),
    };

    let mut next = session;
    match deferred_card {
        Some(card) => next.deferred.push(card),
        None => next.completed += 1,
    }
    next.move_to_next_card();

    log::debug!(
        "Session '{}' after {}: status {:?}, {} deferred",
        next.deck_name,
        action.name(),
        next.status,
        next.deferred.len()
    );

    Ok(Step {
        session: next,
        committed,
    })
}

impl StudySession {
    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn current_card(&self) -> Option<&Card> {
        if self.status.is_finished() {
            return None;
        }
        self.queue.get(self.current_index)
    }

    /// Cards in the pass currently being worked through.
    pub fn queue(&self) -> &[Card] {
        &self.queue
    }

    /// 1-based position of the current card within the current pass.
    pub fn position(&self) -> usize {
        (self.current_index + 1).min(self.queue.len())
    }

    pub fn total_count(&self) -> usize {
        self.queue.len()
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.len()
    }

    /// Cards graded, advanced past or mastered so far.
    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Skipped): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }

    fn move_to_next_card(&mut self) {
        self.revealed = false;
        if self.current_index + 1 < self.queue.len() {
            self.current_index += 1;
        } else if !self.deferred.is_empty() {
            self.queue = std::mem::take(&mut self.deferred);
            self.current_index = 0;
            self.round_number += 1;
        } else {
            self.status = SessionStatus::Complete;
        }
    }
}
