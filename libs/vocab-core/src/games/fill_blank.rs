//! Fill-in-the-blank over genuine example sentences.
//!
//! Only items whose example came from the source sheet, is long enough and
//! contains the word itself can be asked. Distractors are never words that
//! also occur in the sentence, so the blank cannot be solved by spotting
//! them in the text.

use super::{sample_distractors, shuffled_options, GameContext, RoundId, Timer, TimerEffect, TimerKind};
use crate::error::{Result, VocabError};
use crate::text::{blank_whole_word, contains_whole_word};
use crate::types::{GameKind, SessionSettings, VocabularyItem};
use rand::seq::IndexedRandom;

const DISTRACTORS: usize = 3;

/// Items that can be turned into a blank.
pub fn eligible_items<'a>(
    items: &'a [VocabularyItem],
    settings: &SessionSettings,
) -> Vec<&'a VocabularyItem> {
    items
        .iter()
        .filter(|item| {
            !item.synthetic
                && item.example.chars().count() >= settings.min_example_len
                && contains_whole_word(&item.example, &item.word)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillBlankOutcome {
    Correct,
    Wrong { chosen: Option<VocabularyItem> },
}

#[derive(Debug, Clone)]
pub struct FillBlankRound {
    pub id: RoundId,
    pub target: VocabularyItem,
    /// The example with every occurrence of the word blanked out.
    pub sentence: String,
    pub options: Vec<VocabularyItem>,
    pub outcome: Option<FillBlankOutcome>,
}

/// Result of the first submission in a round.
#[derive(Debug, Clone, PartialEq)]
pub enum FillBlankFeedback {
    /// The original sentence is revealed and the next round follows after
    /// `timer`.
    Correct { example: String, timer: Timer },
    /// Stays on screen until [`FillBlankEngine::proceed`] is called.
    Wrong {
        chosen: Option<VocabularyItem>,
        target: VocabularyItem,
    },
}

#[derive(Debug)]
pub struct FillBlankEngine {
    eligible: Vec<VocabularyItem>,
    round: Option<FillBlankRound>,
}

impl FillBlankEngine {
    pub fn start(ctx: &mut GameContext<'_>) -> Result<Self> {
        let eligible: Vec<VocabularyItem> = eligible_items(ctx.items, ctx.settings)
            .into_iter()
            .cloned()
            .collect();

        let required = ctx.settings.min_game_items;
        if eligible.len() < required {
            return Err(VocabError::InsufficientData {
                game: GameKind::FillBlank,
                required,
                available: eligible.len(),
            });
        }

        let mut engine = Self {
            eligible,
            round: None,
        };
        engine.new_round(ctx);
        Ok(engine)
    }

    fn new_round(&mut self, ctx: &mut GameContext<'_>) {
        let Some(target) = self.eligible.choose(&mut *ctx.rng).cloned() else {
            self.round = None;
            return;
        };

        let sentence = blank_whole_word(&target.example, &target.word);
        let distractors = sample_distractors(ctx.items, &target, DISTRACTORS, &mut *ctx.rng, |candidate| {
            !contains_whole_word(&target.example, &candidate.word)
        });
        let options = shuffled_options(&target, distractors, &mut *ctx.rng);

        self.round = Some(FillBlankRound {
            id: ctx.rounds.next_id(),
            target,
            sentence,
            options,
            outcome: None,
        });
    }

    pub fn submit(&mut self, selected: &str, ctx: &GameContext<'_>) -> Option<FillBlankFeedback> {
        let round = self.round.as_mut()?;
        if round.outcome.is_some() {
            return None;
        }

        if selected == round.target.word {
            round.outcome = Some(FillBlankOutcome::Correct);
            ctx.pronounce(&round.target.word);
            return Some(FillBlankFeedback::Correct {
                example: round.target.example.clone(),
                timer: Timer::after_ms(
                    GameKind::FillBlank,
                    round.id,
                    TimerKind::Advance,
                    ctx.settings.fill_blank_correct_delay_ms,
                ),
            });
        }

        let chosen = round.options.iter().find(|o| o.word == selected).cloned();
        round.outcome = Some(FillBlankOutcome::Wrong {
            chosen: chosen.clone(),
        });
        Some(FillBlankFeedback::Wrong {
            chosen,
            target: round.target.clone(),
        })
    }

    /// Leave a wrong answer's explanation. Returns `false` when there is
    /// nothing to continue from.
    pub fn proceed(&mut self, ctx: &mut GameContext<'_>) -> bool {
        let waiting = matches!(
            self.round.as_ref().and_then(|r| r.outcome.as_ref()),
            Some(FillBlankOutcome::Wrong { .. })
        );
        if waiting {
            self.new_round(ctx);
        }
        waiting
    }

    pub(crate) fn fire(&mut self, timer: Timer, ctx: &mut GameContext<'_>) -> Option<TimerEffect> {
        let round = self.round.as_ref()?;
        if timer.kind != TimerKind::Advance
            || timer.round != round.id
            || round.outcome != Some(FillBlankOutcome::Correct)
        {
            return None;
        }
        self.new_round(ctx);
        Some(TimerEffect::NextRound)
    }

    pub fn round(&self) -> Option<&FillBlankRound> {
        self.round.as_ref()
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{item, items, sentence_items, Harness};
    use pretty_assertions::assert_eq;

    #[test]
    fn synthetic_examples_are_not_eligible() {
        let mut deck = items(&["cat", "dog", "bird", "fish"]);
        deck[0].example = "The cat sleeps on the warm mat.".into();
        deck[0].synthetic = false;

        let mut harness = Harness::new(deck, 1);
        let err = FillBlankEngine::start(&mut harness.ctx()).unwrap_err();
        assert!(matches!(
            err,
            VocabError::InsufficientData { game: GameKind::FillBlank, required: 4, available: 1 }
        ));
    }

    #[test]
    fn eligibility_needs_whole_word_and_length() {
        let settings = SessionSettings::default();
        let deck = vec![
            item("cat", "con mèo", "My cat likes to sleep all day."),
            item("cat", "con mèo", "Pick a category from the list."),
            item("sun", "mặt trời", "Hot sun."),
            item("Dog", "con chó", "The dog barked at the mailman."),
        ];
        let eligible: Vec<&str> = eligible_items(&deck, &settings)
            .iter()
            .map(|i| i.example.as_str())
            .collect();
        assert_eq!(
            eligible,
            vec!["My cat likes to sleep all day.", "The dog barked at the mailman."]
        );
    }

    #[test]
    fn round_blanks_target_and_keeps_distractors_out_of_sentence() {
        let mut deck = sentence_items(&["cat", "dog", "bird", "fish"]);
        // "house" and "old" both appear in every sentence and must never be offered
        deck.push(item("house", "ngôi nhà", ""));
        deck.push(item("old", "cũ", ""));
        deck.push(item("tree", "cái cây", ""));

        for seed in 0..30 {
            let mut harness = Harness::new(deck.clone(), seed);
            let engine = FillBlankEngine::start(&mut harness.ctx()).unwrap();
            let round = engine.round().unwrap();

            assert!(!contains_whole_word(&round.sentence, &round.target.word));
            assert!(round.sentence.contains("_____"));
            assert!(round.options.iter().any(|o| o.word == round.target.word));
            for option in round.options.iter().filter(|o| o.word != round.target.word) {
                assert!(
                    !contains_whole_word(&round.target.example, &option.word),
                    "{} leaks into {}",
                    option.word,
                    round.target.example
                );
            }
        }
    }

    #[test]
    fn correct_answer_reveals_and_auto_advances() {
        let mut harness = Harness::new(sentence_items(&["cat", "dog", "bird", "fish"]), 3);
        let mut engine = FillBlankEngine::start(&mut harness.ctx()).unwrap();
        let target = engine.round().unwrap().target.clone();

        let feedback = engine.submit(&target.word, &harness.ctx()).unwrap();
        let FillBlankFeedback::Correct { example, timer } = feedback else {
            panic!("expected correct feedback");
        };
        assert_eq!(example, target.example);
        assert_eq!(harness.speaker.words(), vec![target.word.clone()]);

        assert!(!engine.proceed(&mut harness.ctx()));
        assert_eq!(engine.fire(timer, &mut harness.ctx()), Some(TimerEffect::NextRound));
        assert_ne!(engine.round().unwrap().id, timer.round);
    }

    #[test]
    fn wrong_answer_waits_for_proceed() {
        let mut harness = Harness::new(sentence_items(&["cat", "dog", "bird", "fish"]), 4);
        let mut engine = FillBlankEngine::start(&mut harness.ctx()).unwrap();
        let round = engine.round().unwrap().clone();
        let wrong = round.options.iter().find(|o| o.word != round.target.word).unwrap().clone();

        let feedback = engine.submit(&wrong.word, &harness.ctx()).unwrap();
        assert_eq!(
            feedback,
            FillBlankFeedback::Wrong {
                chosen: Some(wrong.clone()),
                target: round.target.clone(),
            }
        );

        // second click in the same round is ignored
        assert!(engine.submit(&round.target.word, &harness.ctx()).is_none());

        // no timer exists for a miss; an advance aimed at this round does nothing
        let bogus = Timer::after_ms(GameKind::FillBlank, round.id, TimerKind::Advance, 0);
        assert_eq!(engine.fire(bogus, &mut harness.ctx()), None);

        assert!(engine.proceed(&mut harness.ctx()));
        assert_ne!(engine.round().unwrap().id, round.id);
        assert!(engine.round().unwrap().outcome.is_none());
    }
}
