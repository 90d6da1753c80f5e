//! The four mini-games.
//!
//! Engines are plain state machines. Anything that should happen "later"
//! (auto-advance, unlocking after a mismatch, leaving the game) is handed
//! back to the caller as a [`Timer`]; the caller waits `delay` and passes the
//! timer to [`ActiveGame::fire`]. Timers from a round that is no longer
//! current are ignored.

pub mod fill_blank;
pub mod matching;
pub mod quiz;
pub mod scramble;

pub use fill_blank::{FillBlankEngine, FillBlankFeedback, FillBlankRound};
pub use matching::{CardFace, CardMark, MatchCard, MatchingEngine, Selection};
pub use quiz::{QuizEngine, QuizFeedback, QuizRound};
pub use scramble::{PlaceOutcome, ScrambleEngine, ScrambleRound, Tile};

use crate::speech::Speaker;
use crate::types::{GameKind, SessionSettings, VocabularyItem};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::RngCore;
use std::collections::HashSet;
use std::time::Duration;

/// Identifies one round across every engine of a session.
pub type RoundId = u64;

/// Hands out round ids that are never reused within a session.
#[derive(Debug, Clone, Default)]
pub struct RoundSeq(RoundId);

impl RoundSeq {
    pub fn next_id(&mut self) -> RoundId {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Start the next round.
    Advance,
    /// Drop the "wrong" marks of a mismatched pair and unlock input.
    ClearMismatch,
    AnnounceVictory,
    ReturnToMenu,
}

/// A deferred transition owned by one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub game: GameKind,
    pub round: RoundId,
    pub kind: TimerKind,
    pub delay: Duration,
}

impl Timer {
    pub(crate) fn after_ms(game: GameKind, round: RoundId, kind: TimerKind, ms: u64) -> Self {
        Self {
            game,
            round,
            kind,
            delay: Duration::from_millis(ms),
        }
    }
}

/// What a fired timer did.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEffect {
    NextRound,
    QuizFinished { score: u32, total: usize },
    MismatchCleared,
    /// All pairs cleared; `then` returns to the menu.
    Victory { then: Timer },
    ReturnToMenu,
}

/// Everything an engine borrows from the session for one call.
pub struct GameContext<'a> {
    pub items: &'a [VocabularyItem],
    pub rng: &'a mut dyn RngCore,
    pub speaker: &'a dyn Speaker,
    pub settings: &'a SessionSettings,
    pub rounds: &'a mut RoundSeq,
}

impl GameContext<'_> {
    pub fn pronounce(&self, word: &str) {
        self.speaker.pronounce(word, &self.settings.speech_locale);
    }
}

/// Up to `count` items with distinct words, none equal to `target`,
/// all passing `accept`, drawn uniformly without replacement.
pub(crate) fn sample_distractors(
    items: &[VocabularyItem],
    target: &VocabularyItem,
    count: usize,
    rng: &mut dyn RngCore,
    accept: impl Fn(&VocabularyItem) -> bool,
) -> Vec<VocabularyItem> {
    let mut seen = HashSet::new();
    let candidates: Vec<&VocabularyItem> = items
        .iter()
        .filter(|i| i.word != target.word && accept(*i))
        .filter(|i| seen.insert(i.word.clone()))
        .collect();

    candidates
        .choose_multiple(rng, count)
        .map(|i| (*i).clone())
        .collect()
}

/// Target plus distractors in random order.
pub(crate) fn shuffled_options(
    target: &VocabularyItem,
    distractors: Vec<VocabularyItem>,
    rng: &mut dyn RngCore,
) -> Vec<VocabularyItem> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(target.clone());
    options.extend(distractors);
    options.shuffle(rng);
    options
}

/// The game currently being played.
pub enum ActiveGame {
    Quiz(QuizEngine),
    FillBlank(FillBlankEngine),
    Scramble(ScrambleEngine),
    Matching(MatchingEngine),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::Quiz(_) => GameKind::Quiz,
            Self::FillBlank(_) => GameKind::FillBlank,
            Self::Scramble(_) => GameKind::Scramble,
            Self::Matching(_) => GameKind::Matching,
        }
    }

    /// Apply a timer, or ignore it when it belongs to another game or a
    /// stale round.
    pub fn fire(&mut self, timer: Timer, ctx: &mut GameContext<'_>) -> Option<TimerEffect> {
        if timer.game != self.kind() {
            tracing::debug!(game = %timer.game, "timer for inactive game ignored");
            return None;
        }
        let effect = match self {
            Self::Quiz(engine) => engine.fire(timer, ctx),
            Self::FillBlank(engine) => engine.fire(timer, ctx),
            Self::Scramble(engine) => engine.fire(timer, ctx),
            Self::Matching(engine) => engine.fire(timer, ctx),
        };
        if effect.is_none() {
            tracing::debug!(round = timer.round, kind = ?timer.kind, "stale timer ignored");
        }
        effect
    }
}
