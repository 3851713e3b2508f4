pub mod card;
pub mod deck;
pub mod deck_set;
pub mod grade;
pub mod sm2;
pub mod study_session;

pub use card::{Card, Maturity};
pub use deck::Deck;
pub use deck_set::DeckSet;
pub use grade::Grade;
pub use sm2::{DeckStats, classify, compute_next_review, select_due};
pub use study_session::{
    SessionAction, SessionPolicy, SessionStatus, Step, StudySession, advance, build_queue,
};
