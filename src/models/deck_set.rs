//! Container for all available decks
use super::{Card, Deck};
use crate::error::{DeckError, StoreError};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckSet {
    pub decks: Vec<Deck>,
}

impl DeckSet {
    pub fn new(decks: Vec<Deck>) -> Self {
        Self { decks }
    }

    pub fn deck(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }

    pub fn with_deck_added(&self, deck: Deck) -> Result<Self, DeckError> {
        if self.deck(&deck.id).is_some() {
            return Err(DeckError::DuplicateDeck(deck.id));
        }
        let mut decks = self.decks.clone();
        decks.push(deck);
        Ok(Self { decks })
    }

    pub fn with_deck_replaced(&self, deck: Deck) -> Result<Self, DeckError> {
        let position = self
            .decks
            .iter()
            .position(|d| d.id == deck.id)
            .ok_or_else(|| DeckError::UnknownDeck(deck.id.clone()))?;
        let mut decks = self.decks.clone();
        decks[position] = deck;
        Ok(Self { decks })
    }

    /// Merges an updated card into the deck it belongs to.
    pub fn with_card_replaced(&self, deck_id: &str, card: Card) -> Result<Self, DeckError> {
        let deck = self
            .deck(deck_id)
            .ok_or_else(|| DeckError::UnknownDeck(deck_id.to_string()))?;
        self.with_deck_replaced(deck.with_card_replaced(card)?)
    }

    pub fn without_deck(&self, deck_id: &str) -> Result<Self, DeckError> {
        if self.deck(deck_id).is_none() {
            return Err(DeckError::UnknownDeck(deck_id.to_string()));
        }
        Ok(Self {
            decks: self
                .decks
                .iter()
                .filter(|d| d.id != deck_id)
                .cloned()
                .collect(),
        })
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for deck in &self.decks {
            if !seen.insert(deck.id.as_str()) {
                return Err(DeckError::DuplicateDeck(deck.id.clone()).into());
            }
            deck.validate()?;
        }
        Ok(())
    }
}
