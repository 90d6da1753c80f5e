//! Turns raw sheet rows into vocabulary items.
//!
//! Rows without a word are dropped silently. A missing meaning falls back
//! to a placeholder and a missing example is generated from a template
//! that wraps the word in `<strong>`.

use crate::types::{CellValue, RawRecord, RawRow, TopicRows, VocabularyItem};
use rand::seq::IndexedRandom;
use rand::RngCore;

const EXAMPLE_TEMPLATES: &[&str] = &[
    "I am trying to remember the word \"<strong>{}</strong>\".",
    "The teacher explained the meaning of \"<strong>{}</strong>\" in class.",
    "Have you ever heard the word \"<strong>{}</strong>\" before?",
    "It is important to understand what \"<strong>{}</strong>\" means.",
    "We can use \"<strong>{}</strong>\" in many different contexts.",
    "Please look up \"<strong>{}</strong>\" in the dictionary.",
    "Today's keyword is \"<strong>{}</strong>\".",
    "Let's make a sentence with \"<strong>{}</strong>\".",
    "I found the word \"<strong>{}</strong>\" in a book yesterday.",
];

/// Pick a template sentence for `word`.
pub fn synthesize_example(word: &str, rng: &mut dyn RngCore) -> String {
    let template = EXAMPLE_TEMPLATES.choose(rng).copied().unwrap_or(EXAMPLE_TEMPLATES[0]);
    template.replace("{}", word)
}

/// Normalizes rows with a fixed placeholder meaning.
pub struct Normalizer<'a> {
    placeholder_meaning: &'a str,
}

impl<'a> Normalizer<'a> {
    pub fn new(placeholder_meaning: &'a str) -> Self {
        Self { placeholder_meaning }
    }

    /// Normalize every row, dropping the ones without a word.
    pub fn normalize(&self, rows: &TopicRows, rng: &mut dyn RngCore) -> Vec<VocabularyItem> {
        let items: Vec<VocabularyItem> = match rows {
            TopicRows::Positional(rows) => rows
                .iter()
                .skip(1)
                .filter_map(|row| self.normalize_row(row, rng))
                .collect(),
            TopicRows::Records(records) => records
                .iter()
                .filter_map(|record| self.normalize_record(record, rng))
                .collect(),
        };

        let total = match rows {
            TopicRows::Positional(rows) => rows.len().saturating_sub(1),
            TopicRows::Records(records) => records.len(),
        };
        if items.len() < total {
            tracing::debug!(kept = items.len(), total, "dropped rows without a word");
        }
        items
    }

    /// Positional row: `[word, meaning, example]`.
    pub fn normalize_row(&self, row: &RawRow, rng: &mut dyn RngCore) -> Option<VocabularyItem> {
        let cell = |idx: usize| row.get(idx).and_then(CellValue::as_text);
        self.build(cell(0), cell(1), cell(2), rng)
    }

    pub fn normalize_record(&self, record: &RawRecord, rng: &mut dyn RngCore) -> Option<VocabularyItem> {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        self.build(
            field(&record.word),
            field(&record.meaning),
            field(&record.example),
            rng,
        )
    }

    fn build(
        &self,
        word: Option<String>,
        meaning: Option<String>,
        example: Option<String>,
        rng: &mut dyn RngCore,
    ) -> Option<VocabularyItem> {
        let word = word?;
        let meaning = meaning.unwrap_or_else(|| self.placeholder_meaning.to_string());
        let (example, synthetic) = match example {
            Some(example) => (example, false),
            None => (synthesize_example(&word, rng), true),
        };

        Some(VocabularyItem {
            word,
            meaning,
            example,
            synthetic,
        })
    }
}
