pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod speech;

pub use models::{
    Card, Deck, DeckSet, DeckStats, Grade, SessionAction, SessionPolicy, SessionStatus, Step,
    StudySession,
};
