//! Error types for vocab-core.

use crate::types::GameKind;
use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors surfaced by the learning session.
///
/// All of them are local and non-fatal: the session stays usable after any
/// of these is returned.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("topic catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("topic content unreadable: {0}")]
    ContentUnreadable(String),

    #[error("topic {topic} has no vocabulary")]
    EmptyDeck { topic: String },

    #[error("{game} needs at least {required} words, only {available} available")]
    InsufficientData {
        game: GameKind,
        required: usize,
        available: usize,
    },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("durable store error: {0}")]
    Store(String),

    #[error("no game in progress")]
    NoActiveGame,

    #[error("no topic loaded")]
    NoTopicLoaded,
}

impl VocabError {
    /// Whether the shell should show this as a blocking alert rather than
    /// an inline message.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::ContentUnreadable(_) | Self::EmptyDeck { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message_names_the_game() {
        let err = VocabError::InsufficientData {
            game: GameKind::FillBlank,
            required: 4,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "fill-in-the-blank needs at least 4 words, only 1 available"
        );
        assert!(!err.is_blocking());
    }

    #[test]
    fn load_failures_are_blocking() {
        assert!(VocabError::EmptyDeck { topic: "animals.xlsx".into() }.is_blocking());
        assert!(VocabError::ContentUnreadable("bad sheet".into()).is_blocking());
        assert!(!VocabError::CatalogUnavailable("offline".into()).is_blocking());
    }
}
