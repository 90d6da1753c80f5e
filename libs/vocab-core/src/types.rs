//! Core types for the vocabulary trainer.

use crate::error::{Result, VocabError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest deck a choice game can run on: the target plus three distractors.
pub const MIN_GAME_ITEMS: usize = 4;

/// One word/meaning/example triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub word: String,
    pub meaning: String,
    /// Example sentence, may carry `<strong>` markup.
    pub example: String,
    /// Set when `example` was generated from a template rather than taken
    /// from the source sheet.
    #[serde(default)]
    pub synthetic: bool,
}

/// A single raw cell value as delivered by a workbook reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Trimmed textual form, `None` for empty or whitespace-only cells.
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            Self::Empty => return None,
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        };
        if text.is_empty() { None } else { Some(text) }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Positional row: word, meaning, example.
pub type RawRow = Vec<CellValue>;

/// Row keyed by field name rather than position.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "Word", alias = "WORD")]
    pub word: Option<String>,
    #[serde(default, alias = "Meaning", alias = "MEANING")]
    pub meaning: Option<String>,
    #[serde(default, alias = "Example", alias = "EXAMPLE")]
    pub example: Option<String>,
}

/// Rows fetched for a topic, in either source shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicRows {
    /// Sheet rows; the first row is a header and is skipped.
    Positional(Vec<RawRow>),
    Records(Vec<RawRecord>),
}

/// A topic from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
}

impl Topic {
    /// Build a topic from its catalog identifier, e.g. `daily_life.xlsx`
    /// becomes `DAILY LIFE`.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let stem = match id.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => stem,
            _ => id.as_str(),
        };
        let name = stem.replace('_', " ").to_uppercase();
        Self { id, name }
    }
}

/// The four mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Quiz,
    FillBlank,
    Scramble,
    Matching,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::FillBlank => "fill_blank",
            Self::Scramble => "scramble",
            Self::Matching => "matching",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "quiz" => Some(Self::Quiz),
            "fill_blank" | "fill" => Some(Self::FillBlank),
            "scramble" => Some(Self::Scramble),
            "matching" | "match" => Some(Self::Matching),
            _ => None,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Quiz => "quiz",
            Self::FillBlank => "fill-in-the-blank",
            Self::Scramble => "scramble",
            Self::Matching => "matching",
        };
        f.write_str(label)
    }
}

/// Tunable session behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub answer_reward: u32,
    pub min_game_items: usize,
    pub matching_pairs: usize,
    pub min_example_len: usize,
    pub quiz_correct_delay_ms: u64,
    pub quiz_wrong_delay_ms: u64,
    pub fill_blank_correct_delay_ms: u64,
    pub scramble_win_delay_ms: u64,
    pub match_mismatch_delay_ms: u64,
    pub match_victory_delay_ms: u64,
    pub match_menu_delay_ms: u64,
    pub speech_locale: String,
    pub placeholder_meaning: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            answer_reward: 10,
            min_game_items: 4,
            matching_pairs: 6,
            min_example_len: 15,
            quiz_correct_delay_ms: 1000,
            quiz_wrong_delay_ms: 2000,
            fill_blank_correct_delay_ms: 1500,
            scramble_win_delay_ms: 1200,
            match_mismatch_delay_ms: 800,
            match_victory_delay_ms: 500,
            match_menu_delay_ms: 1500,
            speech_locale: "en-US".to_string(),
            placeholder_meaning: "Đang cập nhật nghĩa...".to_string(),
        }
    }
}

impl SessionSettings {
    /// Reject values the games cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.min_game_items < MIN_GAME_ITEMS {
            return Err(VocabError::InvalidSetting {
                name: "min_game_items",
                reason: format!("must be at least {MIN_GAME_ITEMS}"),
            });
        }
        if self.matching_pairs == 0 {
            return Err(VocabError::InvalidSetting {
                name: "matching_pairs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn topic_name_from_id() {
        let topic = Topic::from_id("daily_life.xlsx");
        assert_eq!(topic.id, "daily_life.xlsx");
        assert_eq!(topic.name, "DAILY LIFE");

        assert_eq!(Topic::from_id("travel").name, "TRAVEL");
        assert_eq!(Topic::from_id(".hidden").name, ".HIDDEN");
    }

    #[test]
    fn cell_text_forms() {
        assert_eq!(CellValue::Empty.as_text(), None);
        assert_eq!(CellValue::Text("   ".into()).as_text(), None);
        assert_eq!(CellValue::Text(" cat ".into()).as_text(), Some("cat".into()));
        assert_eq!(CellValue::Number(42.0).as_text(), Some("42".into()));
        assert_eq!(CellValue::Number(2.5).as_text(), Some("2.5".into()));
        assert_eq!(CellValue::Bool(true).as_text(), Some("true".into()));
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: SessionSettings = serde_json::from_str(r#"{"answer_reward": 5}"#).unwrap();
        assert_eq!(settings.answer_reward, 5);
        assert_eq!(settings.min_game_items, 4);
        assert_eq!(settings.speech_locale, "en-US");
    }

    #[test]
    fn settings_bounds() {
        assert!(SessionSettings::default().validate().is_ok());

        let too_few = SessionSettings { min_game_items: 3, ..Default::default() };
        assert_eq!(
            too_few.validate().unwrap_err().to_string(),
            "invalid setting min_game_items: must be at least 4"
        );

        let no_pairs = SessionSettings { matching_pairs: 0, ..Default::default() };
        assert!(matches!(
            no_pairs.validate(),
            Err(VocabError::InvalidSetting { name: "matching_pairs", .. })
        ));
    }

    #[test]
    fn game_kind_round_trips_names() {
        for kind in [GameKind::Quiz, GameKind::FillBlank, GameKind::Scramble, GameKind::Matching] {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_str("chess"), None);
    }
}
