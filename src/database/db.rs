//! Database operations for the vocabulary trainer
//!
//! SQLite is used as a key-value store: the whole decks array is kept as one
//! JSON snapshot under a fixed key, next to a few small pieces of app state.

use super::starter::{is_starter_id, starter_decks};
use crate::error::StoreError;
use crate::models::{Deck, DeckSet};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub const DECKS_KEY: &str = "vocab_trainer.decks";
pub const DAY_OFFSET_KEY: &str = "vocab_trainer.day_offset";

/// Opens (creating if needed) the database file and its key-value table.
pub fn init_database(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    log::info!("Opened deck store at {}", path.display());
    Ok(conn)
}

/// In-memory store, used by tests.
pub fn init_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Loads the saved decks merged with the starter decks.
///
/// A saved deck whose id matches a starter deck replaces it, so progress on
/// the bundled vocabulary survives. Custom decks follow the starter decks.
pub fn load_decks(conn: &Connection, now: DateTime<Utc>) -> Result<DeckSet, StoreError> {
    let starters = starter_decks(now)?;

    let Some(json) = get_value(conn, DECKS_KEY)? else {
        log::info!("No saved decks, starting with {} starter decks", starters.len());
        return Ok(DeckSet::new(starters));
    };

    let saved: Vec<Deck> = serde_json::from_str(&json)?;

    let mut decks: Vec<Deck> = starters
        .iter()
        .map(|starter| {
            saved
                .iter()
                .find(|d| d.id == starter.id)
                .cloned()
                .unwrap_or_else(|| starter.clone())
        })
        .collect();
    decks.extend(
        saved
            .into_iter()
            .filter(|d| !is_starter_id(&starters, &d.id)),
    );

    let deck_set = DeckSet::new(decks);
    deck_set.validate()?;
    log::info!("Loaded {} decks", deck_set.decks.len());
    Ok(deck_set)
}

/// Validates every deck and card, then writes the snapshot in one statement.
pub fn save_decks(conn: &Connection, deck_set: &DeckSet) -> Result<(), StoreError> {
    deck_set.validate()?;
    let json = serde_json::to_string(&deck_set.decks)?;
    set_value(conn, DECKS_KEY, &json)?;
    log::debug!("Saved {} decks", deck_set.decks.len());
    Ok(())
}

/// Number of days the app clock has been moved ahead.
pub fn get_day_offset(conn: &Connection) -> Result<i64, StoreError> {
    match get_value(conn, DAY_OFFSET_KEY)? {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| StoreError::CorruptValue {
            key: DAY_OFFSET_KEY.to_string(),
            value,
        }),
    }
}

/// Moves the app clock ahead by one day (for previewing upcoming reviews).
pub fn advance_day(conn: &Connection) -> Result<i64, StoreError> {
    let next = get_day_offset(conn)? + 1;
    set_value(conn, DAY_OFFSET_KEY, &next.to_string())?;
    log::info!("Advanced app clock to day offset {}", next);
    Ok(next)
}

pub fn reset_day_offset(conn: &Connection) -> Result<(), StoreError> {
    set_value(conn, DAY_OFFSET_KEY, "0")
}
