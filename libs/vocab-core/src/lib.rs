//! Core vocabulary trainer library.
//!
//! Provides:
//! - Row normalization for topic spreadsheets
//! - Deck navigation and persisted learning progress
//! - Four vocabulary games (quiz, fill-in-the-blank, scramble, matching)
//! - The [`Session`] state machine tying them together

pub mod deck;
pub mod error;
pub mod games;
pub mod normalizer;
pub mod progress;
pub mod session;
pub mod source;
pub mod speech;
pub mod text;
pub mod types;

#[cfg(test)]
mod testing;

pub use deck::{Advance, Deck};
pub use error::{Result, VocabError};
pub use games::{ActiveGame, RoundId, Timer, TimerEffect, TimerKind};
pub use normalizer::Normalizer;
pub use progress::{DurableStore, MemoryStore, ProgressStats, ProgressTracker, DIFFICULT_KEY, LEARNED_KEY};
pub use session::Session;
pub use source::TopicSource;
pub use speech::Speaker;
pub use types::{
    CellValue, GameKind, RawRecord, RawRow, SessionSettings, Topic, TopicRows, VocabularyItem,
    MIN_GAME_ITEMS,
};
