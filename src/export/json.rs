//! JSON import/export module for decks.
//! Saves and loads a single Deck, scheduling state included, to/from JSON files.

use crate::error::StoreError;
use crate::models::Deck;
use std::fs;
use std::path::Path;

/// Exports a deck to a JSON file at the specified path.
pub fn export_deck_to_path(deck: &Deck, path: &Path) -> Result<(), StoreError> {
    let json_string = serde_json::to_string_pretty(deck)?;
    fs::write(path, json_string)?;
    log::info!("Deck '{}' exported to {}", deck.name, path.display());
    Ok(())
}

/// Imports a deck from a JSON file.
/// Fails if the file is missing, is not valid JSON, or holds malformed cards.
pub fn import_deck(path: &Path) -> Result<Deck, StoreError> {
    let contents = fs::read_to_string(path)?;
    let mut deck: Deck = serde_json::from_str(&contents)?;
    deck.validate()?;

    // Imported decks are always user decks
    deck.is_default = false;

    log::info!("Deck '{}' imported from {}", deck.name, path.display());
    Ok(deck)
}
