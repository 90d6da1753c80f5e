//! Test doubles and fixtures.

use crate::games::{GameContext, RoundSeq};
use crate::speech::Speaker;
use crate::types::{SessionSettings, VocabularyItem};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;

pub fn item(word: &str, meaning: &str, example: &str) -> VocabularyItem {
    let synthetic = example.is_empty();
    let example = if synthetic {
        format!("Today's keyword is \"<strong>{word}</strong>\".")
    } else {
        example.to_string()
    };
    VocabularyItem {
        word: word.to_string(),
        meaning: meaning.to_string(),
        example,
        synthetic,
    }
}

/// Items with synthetic examples and meanings derived from the word.
pub fn items(words: &[&str]) -> Vec<VocabularyItem> {
    words
        .iter()
        .map(|w| item(w, &format!("meaning of {w}"), ""))
        .collect()
}

/// Items whose examples are genuine sentences containing the word.
pub fn sentence_items(words: &[&str]) -> Vec<VocabularyItem> {
    words
        .iter()
        .map(|w| item(w, &format!("meaning of {w}"), &format!("Yesterday the {w} was seen near the old house.")))
        .collect()
}

#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    pub spoken: RefCell<Vec<String>>,
}

impl RecordingSpeaker {
    pub fn words(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn pronounce(&self, word: &str, _locale: &str) {
        self.spoken.borrow_mut().push(word.to_string());
    }
}

/// Owns everything a [`GameContext`] borrows.
pub struct Harness {
    pub items: Vec<VocabularyItem>,
    pub rng: StdRng,
    pub speaker: RecordingSpeaker,
    pub settings: SessionSettings,
    pub rounds: RoundSeq,
}

impl Harness {
    pub fn new(items: Vec<VocabularyItem>, seed: u64) -> Self {
        Self {
            items,
            rng: StdRng::seed_from_u64(seed),
            speaker: RecordingSpeaker::default(),
            settings: SessionSettings::default(),
            rounds: RoundSeq::default(),
        }
    }

    pub fn ctx(&mut self) -> GameContext<'_> {
        GameContext {
            items: &self.items,
            rng: &mut self.rng,
            speaker: &self.speaker,
            settings: &self.settings,
            rounds: &mut self.rounds,
        }
    }
}
