//! Bundled starter decks, present on first launch and kept after deletion.
use crate::error::StoreError;
use crate::models::{Card, Deck};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const STARTER_DECKS_JSON: &str = include_str!("../../data/starter_decks.json");

#[derive(Deserialize)]
struct StarterDeck {
    id: String,
    name: String,
    cards: Vec<StarterCard>,
}

#[derive(Deserialize)]
struct StarterCard {
    term: String,
    phonetic: String,
    translation: String,
}

/// Builds the starter decks with fresh scheduling state.
///
/// Card ids are derived from the deck id and position so saved progress
/// lines up with the same cards on every launch.
pub fn starter_decks(now: DateTime<Utc>) -> Result<Vec<Deck>, StoreError> {
    let decks: Vec<StarterDeck> = serde_json::from_str(STARTER_DECKS_JSON)?;
    Ok(decks
        .into_iter()
        .map(|deck| Deck {
            cards: deck
                .cards
                .into_iter()
                .enumerate()
                .map(|(i, c)| {
                    Card::with_id(
                        format!("{}-{}", deck.id, i + 1),
                        c.term,
                        c.phonetic,
                        c.translation,
                        now,
                    )
                })
                .collect(),
            id: deck.id,
            name: deck.name,
            is_default: true,
        })
        .collect())
}

pub fn is_starter_id(decks: &[Deck], deck_id: &str) -> bool {
    decks.iter().any(|d| d.id == deck_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeckSet;
    use chrono::TimeZone;

    #[test]
    fn test_starter_decks_are_valid() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        let decks = starter_decks(now).unwrap();

        assert!(!decks.is_empty());
        assert!(decks.iter().all(|d| d.is_default && !d.cards.is_empty()));
        assert!(DeckSet::new(decks.clone()).validate().is_ok());
        assert_eq!(decks[0].cards[0].id, format!("{}-1", decks[0].id));
        assert!(decks[0].cards.iter().all(|c| c.is_due(now)));
    }
}
