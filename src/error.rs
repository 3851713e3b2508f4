//! Error types for scheduling, sessions, deck edits, storage and configuration.

use thiserror::Error;

/// Precondition violations reported by the scheduler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("grade {0} is outside the 0-5 range")]
    InvalidGrade(u8),

    #[error("card '{id}' has malformed scheduling state: {reason}")]
    MalformedCard { id: String, reason: String },

    #[error("card '{id}' cannot be scheduled that far ahead")]
    IntervalOverflow { id: String },
}

/// Errors raised while advancing a study session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("'{action}' is not available in {policy} sessions")]
    UnsupportedAction {
        action: &'static str,
        policy: &'static str,
    },

    #[error("the card must be revealed before '{0}'")]
    NotRevealed(&'static str),

    #[error("the session has already finished")]
    Finished,
}

/// Errors raised by immutable deck and deck set updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeckError {
    #[error("deck '{0}' not found")]
    UnknownDeck(String),

    #[error("card '{0}' not found")]
    UnknownCard(String),

    #[error("deck '{0}' already exists")]
    DuplicateDeck(String),

    #[error("card '{0}' already exists in this deck")]
    DuplicateCard(String),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Errors from the deck store and JSON import/export.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid card data: {0}")]
    InvalidCard(#[from] ScheduleError),

    #[error("Invalid deck data: {0}")]
    InvalidDeck(#[from] DeckError),

    #[error("Stored value for '{key}' is corrupt: {value}")]
    CorruptValue { key: String, value: String },
}

/// Errors while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("No configuration directory is available on this platform")]
    NoConfigDir,
}
