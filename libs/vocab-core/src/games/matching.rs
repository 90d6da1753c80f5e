//! Pair matching: clear word cards against their meaning cards.
//!
//! Selection is a two-phase lock. The first pick is held; the second pick
//! locks input and is compared by pair id. A match unlocks immediately, a
//! mismatch stays locked until its [`TimerKind::ClearMismatch`] timer fires.

use super::{GameContext, RoundId, Timer, TimerEffect, TimerKind};
use crate::error::{Result, VocabError};
use crate::types::{GameKind, VocabularyItem};
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    /// Shows the word.
    Prompt,
    /// Shows the meaning.
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMark {
    Idle,
    Selected,
    Wrong,
    Matched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchCard {
    pub id: usize,
    /// The word both cards of a pair share.
    pub pair_id: String,
    pub face: CardFace,
    pub text: String,
    pub mark: CardMark,
}

/// What a card click did.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Ignored,
    /// First card of a pair is now held.
    Held,
    /// `victory` is set when this was the last pair.
    Matched {
        pairs_remaining: usize,
        victory: Option<Timer>,
    },
    Mismatched { timer: Timer },
}

#[derive(Debug)]
pub struct MatchingEngine {
    round: RoundId,
    cards: Vec<MatchCard>,
    pairs_remaining: usize,
    first: Option<usize>,
    locked: bool,
    mismatch: Option<(usize, usize)>,
}

impl MatchingEngine {
    pub fn start(ctx: &mut GameContext<'_>) -> Result<Self> {
        let required = ctx.settings.min_game_items;
        if ctx.items.len() < required {
            return Err(VocabError::InsufficientData {
                game: GameKind::Matching,
                required,
                available: ctx.items.len(),
            });
        }

        // pair ids are words, so each word may only appear once on the board
        let mut seen = HashSet::new();
        let unique: Vec<&VocabularyItem> = ctx
            .items
            .iter()
            .filter(|i| seen.insert(i.word.clone()))
            .collect();
        let pairs = unique.len().min(ctx.settings.matching_pairs);

        let mut cards: Vec<MatchCard> = unique
            .choose_multiple(&mut *ctx.rng, pairs)
            .flat_map(|item| {
                [
                    (CardFace::Prompt, item.word.clone()),
                    (CardFace::Answer, item.meaning.clone()),
                ]
                .map(|(face, text)| MatchCard {
                    id: 0,
                    pair_id: item.word.clone(),
                    face,
                    text,
                    mark: CardMark::Idle,
                })
            })
            .collect();
        cards.shuffle(&mut *ctx.rng);
        for (id, card) in cards.iter_mut().enumerate() {
            card.id = id;
        }

        tracing::debug!(pairs, "matching board dealt");
        Ok(Self {
            round: ctx.rounds.next_id(),
            cards,
            pairs_remaining: pairs,
            first: None,
            locked: false,
            mismatch: None,
        })
    }

    pub fn select(&mut self, card_id: usize, ctx: &GameContext<'_>) -> Selection {
        if self.locked || self.first == Some(card_id) {
            return Selection::Ignored;
        }
        let Some(card) = self.cards.get(card_id) else {
            return Selection::Ignored;
        };
        if card.mark == CardMark::Matched {
            return Selection::Ignored;
        }

        let Some(first) = self.first else {
            self.first = Some(card_id);
            self.cards[card_id].mark = CardMark::Selected;
            let card = &self.cards[card_id];
            if card.face == CardFace::Prompt {
                ctx.pronounce(&card.text);
            }
            return Selection::Held;
        };

        self.locked = true;
        if self.cards[first].pair_id == self.cards[card_id].pair_id {
            self.cards[first].mark = CardMark::Matched;
            self.cards[card_id].mark = CardMark::Matched;
            self.first = None;
            self.locked = false;
            self.pairs_remaining -= 1;

            let victory = (self.pairs_remaining == 0).then(|| {
                tracing::debug!("all pairs matched");
                Timer::after_ms(
                    GameKind::Matching,
                    self.round,
                    TimerKind::AnnounceVictory,
                    ctx.settings.match_victory_delay_ms,
                )
            });
            return Selection::Matched {
                pairs_remaining: self.pairs_remaining,
                victory,
            };
        }

        self.cards[first].mark = CardMark::Wrong;
        self.cards[card_id].mark = CardMark::Wrong;
        self.mismatch = Some((first, card_id));
        Selection::Mismatched {
            timer: Timer::after_ms(
                GameKind::Matching,
                self.round,
                TimerKind::ClearMismatch,
                ctx.settings.match_mismatch_delay_ms,
            ),
        }
    }

    pub(crate) fn fire(&mut self, timer: Timer, ctx: &GameContext<'_>) -> Option<TimerEffect> {
        if timer.round != self.round {
            return None;
        }
        match timer.kind {
            TimerKind::ClearMismatch => {
                let (a, b) = self.mismatch.take()?;
                self.cards[a].mark = CardMark::Idle;
                self.cards[b].mark = CardMark::Idle;
                self.first = None;
                self.locked = false;
                Some(TimerEffect::MismatchCleared)
            }
            TimerKind::AnnounceVictory if self.is_won() => Some(TimerEffect::Victory {
                then: Timer::after_ms(
                    GameKind::Matching,
                    self.round,
                    TimerKind::ReturnToMenu,
                    ctx.settings.match_menu_delay_ms,
                ),
            }),
            TimerKind::ReturnToMenu if self.is_won() => Some(TimerEffect::ReturnToMenu),
            _ => None,
        }
    }

    pub fn cards(&self) -> &[MatchCard] {
        &self.cards
    }

    pub fn pairs_remaining(&self) -> usize {
        self.pairs_remaining
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_won(&self) -> bool {
        self.pairs_remaining == 0
    }
}
