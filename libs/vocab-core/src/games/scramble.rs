//! Letter scramble: rebuild the word from shuffled tiles.

use super::{GameContext, RoundId, Timer, TimerEffect, TimerKind};
use crate::error::{Result, VocabError};
use crate::text::letters_only;
use crate::types::{GameKind, VocabularyItem};
use rand::seq::{IndexedRandom, SliceRandom};

/// One letter instance. Ids are unique within a round, so repeated letters
/// stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: usize,
    pub letter: char,
}

#[derive(Debug, Clone)]
pub struct ScrambleRound {
    pub id: RoundId,
    pub target: VocabularyItem,
    /// Upper-cased letters of the word, everything else stripped.
    pub answer: String,
    /// Unplaced tiles, in scrambled order.
    pub pool: Vec<Tile>,
    pub placed: Vec<Tile>,
    pub solved: bool,
}

impl ScrambleRound {
    pub fn attempt(&self) -> String {
        self.placed.iter().map(|t| t.letter).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    Placed,
    /// The placed tiles spell the answer; a new round follows after `timer`.
    Solved { timer: Timer },
}

#[derive(Debug)]
pub struct ScrambleEngine {
    round: Option<ScrambleRound>,
}

impl ScrambleEngine {
    /// Fails when no item has a single letter to scramble.
    pub fn start(ctx: &mut GameContext<'_>) -> Result<Self> {
        if !ctx.items.iter().any(|i| !letters_only(&i.word).is_empty()) {
            return Err(VocabError::InsufficientData {
                game: GameKind::Scramble,
                required: 1,
                available: 0,
            });
        }
        let mut engine = Self { round: None };
        engine.new_round(ctx);
        Ok(engine)
    }

    fn new_round(&mut self, ctx: &mut GameContext<'_>) {
        // words made only of digits or punctuation have nothing to scramble
        let candidates: Vec<&VocabularyItem> = ctx
            .items
            .iter()
            .filter(|i| !letters_only(&i.word).is_empty())
            .collect();
        let Some(target) = candidates.choose(&mut *ctx.rng).map(|i| (*i).clone()) else {
            self.round = None;
            return;
        };

        let answer = letters_only(&target.word);
        let mut letters: Vec<char> = answer.chars().collect();
        letters.shuffle(&mut *ctx.rng);
        let pool = letters
            .into_iter()
            .enumerate()
            .map(|(id, letter)| Tile { id, letter })
            .collect();

        self.round = Some(ScrambleRound {
            id: ctx.rounds.next_id(),
            target,
            answer,
            pool,
            placed: Vec::new(),
            solved: false,
        });
    }

    /// Move a tile from the pool to the end of the attempt.
    pub fn place(&mut self, tile_id: usize, ctx: &GameContext<'_>) -> Option<PlaceOutcome> {
        let round = self.round.as_mut()?;
        if round.solved {
            return None;
        }
        let pos = round.pool.iter().position(|t| t.id == tile_id)?;
        let tile = round.pool.remove(pos);
        round.placed.push(tile);

        if round.attempt() != round.answer {
            return Some(PlaceOutcome::Placed);
        }

        round.solved = true;
        ctx.pronounce(&round.target.word);
        tracing::debug!(word = %round.target.word, "scramble solved");
        Some(PlaceOutcome::Solved {
            timer: Timer::after_ms(
                GameKind::Scramble,
                round.id,
                TimerKind::Advance,
                ctx.settings.scramble_win_delay_ms,
            ),
        })
    }

    /// Take a placed tile back into the pool at its scrambled position.
    pub fn remove(&mut self, tile_id: usize) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.solved {
            return false;
        }
        let Some(pos) = round.placed.iter().position(|t| t.id == tile_id) else {
            return false;
        };
        let tile = round.placed.remove(pos);
        let slot = round.pool.partition_point(|t| t.id < tile.id);
        round.pool.insert(slot, tile);
        true
    }

    /// Abandon the current word for a fresh one.
    pub fn skip(&mut self, ctx: &mut GameContext<'_>) {
        self.new_round(ctx);
    }

    pub(crate) fn fire(&mut self, timer: Timer, ctx: &mut GameContext<'_>) -> Option<TimerEffect> {
        let round = self.round.as_ref()?;
        if timer.kind != TimerKind::Advance || timer.round != round.id || !round.solved {
            return None;
        }
        self.new_round(ctx);
        Some(TimerEffect::NextRound)
    }

    pub fn round(&self) -> Option<&ScrambleRound> {
        self.round.as_ref()
    }
}
