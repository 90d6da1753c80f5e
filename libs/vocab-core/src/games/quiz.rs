//! Exhaustive multiple-choice quiz.
//!
//! Every deck item is asked exactly once per session, in random order.
//! Distractors come from the whole deck, not just the unasked queue.

use super::{sample_distractors, shuffled_options, GameContext, RoundId, Timer, TimerEffect, TimerKind};
use crate::error::{Result, VocabError};
use crate::types::{GameKind, VocabularyItem};
use rand::seq::SliceRandom;

const DISTRACTORS: usize = 3;

/// The answer given in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAnswer {
    pub selected: String,
    pub correct: bool,
}

#[derive(Debug, Clone)]
pub struct QuizRound {
    pub id: RoundId,
    pub target: VocabularyItem,
    pub options: Vec<VocabularyItem>,
    /// First accepted answer; later submissions are ignored.
    pub answer: Option<QuizAnswer>,
}

/// Result of the first submission in a round.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizFeedback {
    pub correct: bool,
    /// Revealed so the UI can highlight it on a miss.
    pub correct_word: String,
    pub score: u32,
    pub timer: Timer,
}

#[derive(Debug)]
pub struct QuizEngine {
    queue: Vec<VocabularyItem>,
    total: usize,
    score: u32,
    round: Option<QuizRound>,
}

impl QuizEngine {
    /// Shuffle the whole deck into a queue and open the first round.
    pub fn start(ctx: &mut GameContext<'_>) -> Result<Self> {
        let required = ctx.settings.min_game_items;
        if ctx.items.len() < required {
            return Err(VocabError::InsufficientData {
                game: GameKind::Quiz,
                required,
                available: ctx.items.len(),
            });
        }

        let mut queue = ctx.items.to_vec();
        queue.shuffle(&mut *ctx.rng);

        let mut engine = Self {
            total: queue.len(),
            queue,
            score: 0,
            round: None,
        };
        engine.next_round(ctx);
        Ok(engine)
    }

    /// Pop the next target. Returns `false` once the queue is exhausted.
    fn next_round(&mut self, ctx: &mut GameContext<'_>) -> bool {
        let Some(target) = self.queue.pop() else {
            self.round = None;
            tracing::debug!(score = self.score, total = self.total, "quiz finished");
            return false;
        };

        let distractors = sample_distractors(ctx.items, &target, DISTRACTORS, &mut *ctx.rng, |_| true);
        let options = shuffled_options(&target, distractors, &mut *ctx.rng);
        ctx.pronounce(&target.word);

        self.round = Some(QuizRound {
            id: ctx.rounds.next_id(),
            target,
            options,
            answer: None,
        });
        true
    }

    /// Accept the first answer of the current round.
    pub fn submit(&mut self, selected: &str, ctx: &GameContext<'_>) -> Option<QuizFeedback> {
        let round = self.round.as_mut()?;
        if round.answer.is_some() {
            return None;
        }

        let correct = selected == round.target.word;
        round.answer = Some(QuizAnswer {
            selected: selected.to_string(),
            correct,
        });

        let delay_ms = if correct {
            self.score = self.score.saturating_add(ctx.settings.answer_reward);
            ctx.settings.quiz_correct_delay_ms
        } else {
            ctx.settings.quiz_wrong_delay_ms
        };

        Some(QuizFeedback {
            correct,
            correct_word: round.target.word.clone(),
            score: self.score,
            timer: Timer::after_ms(GameKind::Quiz, round.id, TimerKind::Advance, delay_ms),
        })
    }

    pub(crate) fn fire(&mut self, timer: Timer, ctx: &mut GameContext<'_>) -> Option<TimerEffect> {
        let round = self.round.as_ref()?;
        if timer.kind != TimerKind::Advance || timer.round != round.id || round.answer.is_none() {
            return None;
        }

        if self.next_round(ctx) {
            Some(TimerEffect::NextRound)
        } else {
            Some(TimerEffect::QuizFinished {
                score: self.score,
                total: self.total,
            })
        }
    }

    pub fn round(&self) -> Option<&QuizRound> {
        self.round.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.round.is_none() && self.queue.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Items not yet asked, excluding the current round.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{items, Harness};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn play_round(engine: &mut QuizEngine, harness: &mut Harness, answer_correctly: bool) -> Option<TimerEffect> {
        let round = engine.round().unwrap().clone();
        let selected = if answer_correctly {
            round.target.word.clone()
        } else {
            round
                .options
                .iter()
                .find(|o| o.word != round.target.word)
                .unwrap()
                .word
                .clone()
        };
        let feedback = engine.submit(&selected, &harness.ctx()).unwrap();
        engine.fire(feedback.timer, &mut harness.ctx())
    }

    #[test]
    fn refuses_small_decks() {
        let mut harness = Harness::new(items(&["cat", "dog", "bird"]), 1);
        let err = QuizEngine::start(&mut harness.ctx()).unwrap_err();
        assert!(matches!(
            err,
            VocabError::InsufficientData { game: GameKind::Quiz, required: 4, available: 3 }
        ));
    }

    #[test]
    fn starts_with_four_synthetic_items() {
        let mut harness = Harness::new(items(&["cat", "dog", "bird", "fish"]), 1);
        let engine = QuizEngine::start(&mut harness.ctx()).unwrap();
        let round = engine.round().unwrap();

        assert_eq!(round.options.len(), 4);
        let words: HashSet<&str> = round.options.iter().map(|o| o.word.as_str()).collect();
        assert_eq!(words.len(), 4);
        assert!(words.contains(round.target.word.as_str()));
        assert_eq!(harness.speaker.words(), vec![round.target.word.clone()]);
    }

    #[test]
    fn asks_every_item_exactly_once() {
        let words = ["cat", "dog", "bird", "fish", "cow", "duck", "goat"];
        let mut harness = Harness::new(items(&words), 7);
        let mut engine = QuizEngine::start(&mut harness.ctx()).unwrap();

        let mut asked = Vec::new();
        let mut rounds = 0;
        loop {
            asked.push(engine.round().unwrap().target.word.clone());
            rounds += 1;
            match play_round(&mut engine, &mut harness, rounds % 2 == 0) {
                Some(TimerEffect::NextRound) => continue,
                Some(TimerEffect::QuizFinished { score, total }) => {
                    assert_eq!(total, words.len());
                    assert_eq!(score, 10 * (words.len() as u32 / 2));
                    break;
                }
                other => panic!("unexpected effect {other:?}"),
            }
        }

        assert_eq!(rounds, words.len());
        asked.sort();
        let mut expected: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        expected.sort();
        assert_eq!(asked, expected);
        assert!(engine.is_finished());
    }

    #[test]
    fn first_answer_wins() {
        let mut harness = Harness::new(items(&["cat", "dog", "bird", "fish"]), 3);
        let mut engine = QuizEngine::start(&mut harness.ctx()).unwrap();
        let target = engine.round().unwrap().target.word.clone();

        let feedback = engine.submit("definitely wrong", &harness.ctx()).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_word, target);
        assert_eq!(feedback.timer.delay.as_millis(), 2000);

        assert!(engine.submit(&target, &harness.ctx()).is_none());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn correct_answer_scores_and_advances_quickly() {
        let mut harness = Harness::new(items(&["cat", "dog", "bird", "fish"]), 4);
        let mut engine = QuizEngine::start(&mut harness.ctx()).unwrap();
        let target = engine.round().unwrap().target.word.clone();

        let feedback = engine.submit(&target, &harness.ctx()).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.score, 10);
        assert_eq!(feedback.timer.delay.as_millis(), 1000);
    }

    #[test]
    fn score_saturates_at_the_top() {
        let mut harness = Harness::new(items(&["cat", "dog", "bird", "fish"]), 4);
        harness.settings.answer_reward = u32::MAX;
        let mut engine = QuizEngine::start(&mut harness.ctx()).unwrap();

        play_round(&mut engine, &mut harness, true);
        play_round(&mut engine, &mut harness, true);
        assert_eq!(engine.score(), u32::MAX);
    }

    #[test]
    fn stale_or_premature_timers_are_ignored() {
        let mut harness = Harness::new(items(&["cat", "dog", "bird", "fish"]), 5);
        let mut engine = QuizEngine::start(&mut harness.ctx()).unwrap();
        let round_id = engine.round().unwrap().id;

        // not answered yet
        let early = Timer::after_ms(GameKind::Quiz, round_id, TimerKind::Advance, 0);
        assert_eq!(engine.fire(early, &mut harness.ctx()), None);

        let target = engine.round().unwrap().target.word.clone();
        let feedback = engine.submit(&target, &harness.ctx()).unwrap();
        assert_eq!(engine.fire(feedback.timer, &mut harness.ctx()), Some(TimerEffect::NextRound));
        // same timer again belongs to the previous round
        assert_eq!(engine.fire(feedback.timer, &mut harness.ctx()), None);
        assert_eq!(engine.remaining(), 2);
    }
}
