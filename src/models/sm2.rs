//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each card has an ease factor (EF) that adjusts after every review
//! - Grades 0-2: repetition count resets and the card comes back tomorrow
//! - Grades 3-5: interval grows progressively (1 day → 6 days → interval × EF)
//! - EF is adjusted after each review, pass or fail, and never drops below 1.3

use super::{Card, Grade, Maturity};
use crate::error::ScheduleError;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Card counts for a deck, as shown on the deck list and end screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeckStats {
    pub total: usize,
    pub due: usize,
    pub new: usize,
    pub learning: usize,
    pub mature: usize,
}

/// Computes the card's scheduling state after a review.
///
/// Only the scheduling fields change; the returned card is a new value and the
/// caller is responsible for merging it into its deck.
pub fn compute_next_review(
    card: &Card,
    grade: Grade,
    now: DateTime<Utc>,
) -> Result<Card, ScheduleError> {
    card.validate()?;

    let (interval, repetition) = if grade.is_success() {
        let interval = match card.repetition {
            0 => 1,
            1 => 6,
            _ => {
                let next = (f64::from(card.interval) * card.ease_factor).round();
                if next > f64::from(u32::MAX) {
                    return Err(interval_overflow(card));
                }
                next as u32
            }
        };
        (interval, card.repetition.saturating_add(1))
    } else {
        (1, 0)
    };

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let q = f64::from(Grade::MAX - grade.value());
    let ease_factor = (card.ease_factor + (0.1 - q * (0.08 + q * 0.02))).max(MIN_EASE_FACTOR);

    let due_date = Duration::try_days(i64::from(interval))
        .and_then(|days| now.checked_add_signed(days))
        .ok_or_else(|| interval_overflow(card))?;

    Ok(Card {
        interval,
        repetition,
        ease_factor,
        due_date,
        ..card.clone()
    })
}

fn interval_overflow(card: &Card) -> ScheduleError {
    ScheduleError::IntervalOverflow {
        id: card.id.clone(),
    }
}

/// Cards whose due date has arrived, in input order.
pub fn select_due(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    cards.iter().filter(|card| card.is_due(now)).cloned().collect()
}

pub fn classify(cards: &[Card], now: DateTime<Utc>) -> DeckStats {
    cards.iter().fold(
        DeckStats {
            total: cards.len(),
            ..DeckStats::default()
        },
        |mut stats, card| {
            if card.is_due(now) {
                stats.due += 1;
            }
            match card.maturity() {
                Maturity::New => stats.new += 1,
                Maturity::Learning => stats.learning += 1,
                Maturity::Mature => stats.mature += 1,
            }
            stats
        },
    )
}
