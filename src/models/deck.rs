//! Deck is a named set of cards. Updates return new decks instead of mutating.
use super::Card;
use super::sm2::{DeckStats, classify};
use crate::error::{DeckError, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
    /// Bundled starter decks are always present after loading.
    #[serde(default)]
    pub is_default: bool,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "My Deck".to_string(),
            cards: Vec::new(),
            is_default: false,
        }
    }
}

impl Deck {
    pub fn new(name: &str) -> Result<Self, DeckError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckError::EmptyField("deck name"));
        }
        Ok(Self {
            name: name.to_string(),
            ..Self::default()
        })
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> DeckStats {
        classify(&self.cards, now)
    }

    pub fn mastered_count(&self) -> usize {
        self.cards.iter().filter(|c| c.mastered).count()
    }

    pub fn with_card_added(&self, card: Card) -> Result<Self, DeckError> {
        check_card_text(&card.term, &card.phonetic, &card.translation)?;
        if self.card(&card.id).is_some() {
            return Err(DeckError::DuplicateCard(card.id));
        }
        let mut cards = self.cards.clone();
        cards.push(card);
        Ok(Self {
            cards,
            ..self.clone()
        })
    }

    /// Replaces the card with the same id, keeping its position.
    pub fn with_card_replaced(&self, card: Card) -> Result<Self, DeckError> {
        let position = self
            .cards
            .iter()
            .position(|c| c.id == card.id)
            .ok_or_else(|| DeckError::UnknownCard(card.id.clone()))?;
        let mut cards = self.cards.clone();
        cards[position] = card;
        Ok(Self {
            cards,
            ..self.clone()
        })
    }

    /// Edits the display fields of a card, leaving its scheduling state alone.
    pub fn with_card_text(
        &self,
        card_id: &str,
        term: &str,
        phonetic: &str,
        translation: &str,
    ) -> Result<Self, DeckError> {
        check_card_text(term, phonetic, translation)?;
        let card = self
            .card(card_id)
            .ok_or_else(|| DeckError::UnknownCard(card_id.to_string()))?;
        self.with_card_replaced(Card {
            term: term.trim().to_string(),
            phonetic: phonetic.trim().to_string(),
            translation: translation.trim().to_string(),
            ..card.clone()
        })
    }

    pub fn without_card(&self, card_id: &str) -> Result<Self, DeckError> {
        if self.card(card_id).is_none() {
            return Err(DeckError::UnknownCard(card_id.to_string()));
        }
        Ok(Self {
            cards: self
                .cards
                .iter()
                .filter(|c| c.id != card_id)
                .cloned()
                .collect(),
            ..self.clone()
        })
    }

    /// Checks card uniqueness and every card's scheduling state.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(DeckError::EmptyField("deck name").into());
        }
        let mut seen = HashSet::new();
        for card in &self.cards {
            if !seen.insert(card.id.as_str()) {
                return Err(DeckError::DuplicateCard(card.id.clone()).into());
            }
            card.validate()?;
        }
        Ok(())
    }
}

fn check_card_text(term: &str, phonetic: &str, translation: &str) -> Result<(), DeckError> {
    if term.trim().is_empty() {
        return Err(DeckError::EmptyField("term"));
    }
    if phonetic.trim().is_empty() {
        return Err(DeckError::EmptyField("phonetic"));
    }
    if translation.trim().is_empty() {
        return Err(DeckError::EmptyField("translation"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    fn sample_deck() -> Deck {
        Deck {
            id: "d1".to_string(),
            name: "Greetings".to_string(),
            cards: vec![
                Card::with_id("a", "你好", "nǐ hǎo", "hello", now()),
                Card::with_id("b", "再见", "zàijiàn", "goodbye", now()),
            ],
            is_default: false,
        }
    }

    #[test]
    fn test_new_deck_requires_name() {
        assert_eq!(Deck::new("   "), Err(DeckError::EmptyField("deck name")));

        let deck = Deck::new(" Food ").unwrap();
        assert_eq!(deck.name, "Food");
        assert!(deck.cards.is_empty());
    }

    #[test]
    fn test_add_card_leaves_original_untouched() {
        let deck = sample_deck();
        let updated = deck
            .with_card_added(Card::with_id("c", "谢谢", "xièxie", "thank you", now()))
            .unwrap();

        assert_eq!(deck.cards.len(), 2);
        assert_eq!(updated.cards.len(), 3);
        assert_eq!(updated.cards[2].id, "c");
    }

    #[test]
    fn test_add_card_rejects_duplicate_id() {
        let deck = sample_deck();
        let result = deck.with_card_added(Card::with_id("a", "x", "y", "z", now()));
        assert_eq!(result, Err(DeckError::DuplicateCard("a".to_string())));
    }

    #[test]
    fn test_add_card_rejects_blank_fields() {
        let deck = sample_deck();
        let result = deck.with_card_added(Card::with_id("c", "谢谢", " ", "thank you", now()));
        assert_eq!(result, Err(DeckError::EmptyField("phonetic")));
    }

    #[test]
    fn test_replace_card_keeps_position() {
        let deck = sample_deck();
        let mut card = deck.cards[0].clone();
        card.repetition = 4;

        let updated = deck.with_card_replaced(card).unwrap();
        assert_eq!(updated.cards[0].repetition, 4);
        assert_eq!(updated.cards[1].id, "b");
    }

    #[test]
    fn test_edit_text_keeps_schedule() {
        let mut deck = sample_deck();
        deck.cards[1].interval = 6;
        deck.cards[1].repetition = 2;

        let updated = deck
            .with_card_text("b", "再见", "zài jiàn", "see you again")
            .unwrap();
        let card = updated.card("b").unwrap();
        assert_eq!(card.phonetic, "zài jiàn");
        assert_eq!(card.translation, "see you again");
        assert_eq!(card.interval, 6);
        assert_eq!(card.repetition, 2);
    }

    #[test]
    fn test_remove_card() {
        let deck = sample_deck();
        let updated = deck.without_card("a").unwrap();
        assert_eq!(updated.cards.len(), 1);
        assert!(updated.card("a").is_none());

        assert_eq!(
            deck.without_card("zzz"),
            Err(DeckError::UnknownCard("zzz".to_string()))
        );
    }

    #[test]
    fn test_validate_detects_duplicate_ids() {
        let mut deck = sample_deck();
        deck.cards[1].id = "a".to_string();
        assert!(matches!(
            deck.validate(),
            Err(StoreError::InvalidDeck(DeckError::DuplicateCard(_)))
        ));
    }

    #[test]
    fn test_stats_and_mastered_count() {
        let mut deck = sample_deck();
        deck.cards[0].mastered = true;

        assert_eq!(deck.mastered_count(), 1);
        assert_eq!(deck.stats(now()).total, 2);
        assert_eq!(deck.stats(now()).due, 2);
    }
}
