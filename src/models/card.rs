//! Card is a vocabulary entry: a term, its phonetic rendering and a translation,
//! together with the scheduling state the SM-2 scheduler maintains.
use crate::error::ScheduleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::sm2::MIN_EASE_FACTOR;

pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Repetition count from which a card counts as mature.
pub const MATURE_REPETITIONS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub term: String,
    pub phonetic: String,
    pub translation: String,
    pub interval: u32,
    pub repetition: u32,
    pub ease_factor: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub mastered: bool,
}

/// Learning stage derived from the repetition count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Maturity {
    New,
    Learning,
    Mature,
}

impl Card {
    pub fn new(
        term: impl Into<String>,
        phonetic: impl Into<String>,
        translation: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), term, phonetic, translation, now)
    }

    /// Creates a fresh card with a caller-chosen id.
    pub fn with_id(
        id: impl Into<String>,
        term: impl Into<String>,
        phonetic: impl Into<String>,
        translation: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            phonetic: phonetic.into(),
            translation: translation.into(),
            interval: 0,
            repetition: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            due_date: now,
            mastered: false,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due_date <= now
    }

    pub fn maturity(&self) -> Maturity {
        match self.repetition {
            0 => Maturity::New,
            r if r < MATURE_REPETITIONS => Maturity::Learning,
            _ => Maturity::Mature,
        }
    }

    /// Returns a copy flagged as mastered.
    pub fn as_mastered(&self) -> Self {
        Self {
            mastered: true,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if !self.ease_factor.is_finite() {
            return Err(self.malformed("ease factor is not a finite number"));
        }
        if self.ease_factor < MIN_EASE_FACTOR {
            return Err(self.malformed(&format!(
                "ease factor {} is below {}",
                self.ease_factor, MIN_EASE_FACTOR
            )));
        }
        Ok(())
    }

    fn malformed(&self, reason: &str) -> ScheduleError {
        ScheduleError::MalformedCard {
            id: self.id.clone(),
            reason: reason.to_string(),
        }
    }
}
