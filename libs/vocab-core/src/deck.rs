//! The active topic's vocabulary plus a navigation cursor.

use crate::error::{Result, VocabError};
use crate::types::VocabularyItem;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Result of advancing the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Advanced,
    /// Already on the last card; the caller decides whether to suggest games.
    AtEnd,
}

/// Ordered vocabulary with a cursor.
///
/// `cursor < items.len()` holds whenever the deck is non-empty.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    items: Vec<VocabularyItem>,
    cursor: usize,
}

impl Deck {
    /// Build a deck, refusing an empty item list.
    pub fn new(topic: &str, items: Vec<VocabularyItem>) -> Result<Self> {
        let mut deck = Self::default();
        deck.load(topic, items)?;
        Ok(deck)
    }

    /// Replace the contents wholesale and rewind. An empty list leaves the
    /// deck untouched.
    pub fn load(&mut self, topic: &str, items: Vec<VocabularyItem>) -> Result<()> {
        if items.is_empty() {
            return Err(VocabError::EmptyDeck {
                topic: topic.to_string(),
            });
        }
        self.items = items;
        self.cursor = 0;
        Ok(())
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.items.get(self.cursor)
    }

    pub fn next(&mut self) -> Advance {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
            Advance::Advanced
        } else {
            Advance::AtEnd
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Uniform permutation of the items; rewinds the cursor.
    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.items.shuffle(rng);
        self.cursor = 0;
    }

    /// Position as a fraction in `(0, 1]`, `0.0` for an empty deck.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        (self.cursor + 1) as f64 / self.items.len() as f64
    }
}
