//! The learning session: one deck, its progress and the running game.

use crate::deck::{Advance, Deck};
use crate::error::{Result, VocabError};
use crate::games::{
    ActiveGame, FillBlankEngine, FillBlankFeedback, GameContext, MatchingEngine, PlaceOutcome,
    QuizEngine, QuizFeedback, RoundSeq, ScrambleEngine, Selection, Timer, TimerEffect, TimerKind,
};
use crate::normalizer::Normalizer;
use crate::progress::{DurableStore, ProgressStats, ProgressTracker};
use crate::source::TopicSource;
use crate::speech::Speaker;
use crate::types::{GameKind, SessionSettings, Topic, TopicRows, VocabularyItem};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Owned by the hosting shell; every user action goes through it.
pub struct Session<S: DurableStore, P: Speaker> {
    settings: SessionSettings,
    topic: Option<Topic>,
    deck: Deck,
    progress: ProgressTracker<S>,
    speaker: P,
    game: Option<ActiveGame>,
    rng: StdRng,
    rounds: RoundSeq,
}

impl<S: DurableStore, P: Speaker> Session<S, P> {
    /// Create a session, restoring progress from `store`.
    pub fn new(store: S, speaker: P, settings: SessionSettings) -> Result<Self> {
        Self::with_rng(store, speaker, settings, StdRng::from_os_rng())
    }

    /// Like [`Session::new`] with reproducible randomness.
    pub fn with_seed(store: S, speaker: P, settings: SessionSettings, seed: u64) -> Result<Self> {
        Self::with_rng(store, speaker, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: S, speaker: P, settings: SessionSettings, rng: StdRng) -> Result<Self> {
        Ok(Self {
            settings,
            topic: None,
            deck: Deck::default(),
            progress: ProgressTracker::load(store)?,
            speaker,
            game: None,
            rng,
            rounds: RoundSeq::default(),
        })
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Replace the settings, refusing values the games cannot run with.
    pub fn set_settings(&mut self, settings: SessionSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn topic(&self) -> Option<&Topic> {
        self.topic.as_ref()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn speaker(&self) -> &P {
        &self.speaker
    }

    // ---- topics ----

    pub async fn list_topics<C: TopicSource>(&self, source: &C) -> Result<Vec<Topic>> {
        let ids = source.list_topics().await.map_err(|e| match e {
            VocabError::CatalogUnavailable(_) => e,
            other => VocabError::CatalogUnavailable(other.to_string()),
        })?;
        Ok(ids.into_iter().map(Topic::from_id).collect())
    }

    /// Fetch and load a topic. On any failure the current deck is kept.
    pub async fn load_topic<C: TopicSource>(&mut self, source: &C, topic_id: &str) -> Result<&Deck> {
        let rows = source.fetch_rows(topic_id).await.map_err(|e| match e {
            VocabError::ContentUnreadable(_) => e,
            other => VocabError::ContentUnreadable(other.to_string()),
        })?;
        self.load_rows(Topic::from_id(topic_id), &rows)
    }

    /// Normalize already fetched rows into the deck.
    pub fn load_rows(&mut self, topic: Topic, rows: &TopicRows) -> Result<&Deck> {
        let items = Normalizer::new(&self.settings.placeholder_meaning).normalize(rows, &mut self.rng);
        self.load_items(topic, items)
    }

    pub fn load_items(&mut self, topic: Topic, items: Vec<VocabularyItem>) -> Result<&Deck> {
        self.deck.load(&topic.id, items)?;
        tracing::info!(topic = %topic.id, words = self.deck.len(), "topic loaded");
        self.topic = Some(topic);
        self.game = None;
        Ok(&self.deck)
    }

    // ---- flashcards ----

    fn loaded(&self) -> Result<&VocabularyItem> {
        self.deck.current().ok_or(VocabError::NoTopicLoaded)
    }

    pub fn current_card(&self) -> Option<&VocabularyItem> {
        self.deck.current()
    }

    pub fn next_card(&mut self) -> Result<Advance> {
        self.loaded()?;
        Ok(self.deck.next())
    }

    pub fn previous_card(&mut self) -> Result<()> {
        self.loaded()?;
        self.deck.previous();
        Ok(())
    }

    pub fn shuffle(&mut self) -> Result<()> {
        self.loaded()?;
        self.deck.shuffle(&mut self.rng);
        Ok(())
    }

    pub fn speak_current(&self) -> Result<()> {
        let item = self.loaded()?;
        self.speaker.pronounce(&item.word, &self.settings.speech_locale);
        Ok(())
    }

    /// Mark the current word learned, then move on.
    pub fn mark_learned(&mut self) -> Result<Advance> {
        let word = self.loaded()?.word.clone();
        self.progress.mark_learned(&word)?;
        Ok(self.deck.next())
    }

    /// Returns whether the current item was newly added.
    pub fn mark_difficult(&mut self) -> Result<bool> {
        let item = self.loaded()?.clone();
        self.progress.mark_difficult(&item)
    }

    pub fn stats(&self) -> ProgressStats {
        self.progress.stats()
    }

    pub fn progress(&self) -> &ProgressTracker<S> {
        &self.progress
    }

    /// Destroys all learning history. Callers confirm with the user first.
    pub fn reset_progress(&mut self) -> Result<()> {
        self.progress.reset()
    }

    // ---- games ----

    pub fn game(&self) -> Option<&ActiveGame> {
        self.game.as_ref()
    }

    pub fn leave_game(&mut self) {
        if let Some(game) = self.game.take() {
            tracing::debug!(game = %game.kind(), "left game");
        }
    }

    /// Start a fresh game, replacing any running one.
    pub fn start_game(&mut self, kind: GameKind) -> Result<&ActiveGame> {
        self.loaded()?;
        self.game = None;

        let mut ctx = GameContext {
            items: self.deck.items(),
            rng: &mut self.rng,
            speaker: &self.speaker,
            settings: &self.settings,
            rounds: &mut self.rounds,
        };
        let game = match kind {
            GameKind::Quiz => ActiveGame::Quiz(QuizEngine::start(&mut ctx)?),
            GameKind::FillBlank => ActiveGame::FillBlank(FillBlankEngine::start(&mut ctx)?),
            GameKind::Scramble => ActiveGame::Scramble(ScrambleEngine::start(&mut ctx)?),
            GameKind::Matching => ActiveGame::Matching(MatchingEngine::start(&mut ctx)?),
        };
        tracing::debug!(game = %kind, "game started");
        Ok(&*self.game.insert(game))
    }

    /// Run `f` against the running game with a borrowed context.
    fn with_game<T>(
        &mut self,
        f: impl FnOnce(&mut ActiveGame, &mut GameContext<'_>) -> Option<T>,
    ) -> Result<T> {
        let game = self.game.as_mut().ok_or(VocabError::NoActiveGame)?;
        let mut ctx = GameContext {
            items: self.deck.items(),
            rng: &mut self.rng,
            speaker: &self.speaker,
            settings: &self.settings,
            rounds: &mut self.rounds,
        };
        f(game, &mut ctx).ok_or(VocabError::NoActiveGame)
    }

    /// `Ok(None)` when the round was already answered.
    pub fn submit_quiz(&mut self, word: &str) -> Result<Option<QuizFeedback>> {
        self.with_game(|game, ctx| match game {
            ActiveGame::Quiz(engine) => Some(engine.submit(word, ctx)),
            _ => None,
        })
    }

    pub fn submit_fill_blank(&mut self, word: &str) -> Result<Option<FillBlankFeedback>> {
        self.with_game(|game, ctx| match game {
            ActiveGame::FillBlank(engine) => Some(engine.submit(word, ctx)),
            _ => None,
        })
    }

    /// Move past a wrong fill-in-the-blank answer.
    pub fn proceed_fill_blank(&mut self) -> Result<bool> {
        self.with_game(|game, ctx| match game {
            ActiveGame::FillBlank(engine) => Some(engine.proceed(ctx)),
            _ => None,
        })
    }

    pub fn place_tile(&mut self, tile_id: usize) -> Result<Option<PlaceOutcome>> {
        self.with_game(|game, ctx| match game {
            ActiveGame::Scramble(engine) => Some(engine.place(tile_id, ctx)),
            _ => None,
        })
    }

    pub fn remove_tile(&mut self, tile_id: usize) -> Result<bool> {
        self.with_game(|game, _| match game {
            ActiveGame::Scramble(engine) => Some(engine.remove(tile_id)),
            _ => None,
        })
    }

    pub fn skip_scramble(&mut self) -> Result<()> {
        self.with_game(|game, ctx| match game {
            ActiveGame::Scramble(engine) => {
                engine.skip(ctx);
                Some(())
            }
            _ => None,
        })
    }

    pub fn select_card(&mut self, card_id: usize) -> Result<Selection> {
        self.with_game(|game, ctx| match game {
            ActiveGame::Matching(engine) => Some(engine.select(card_id, ctx)),
            _ => None,
        })
    }

    /// Deliver an elapsed timer. Stale timers yield `None`.
    pub fn fire(&mut self, timer: Timer) -> Option<TimerEffect> {
        let effect = self
            .with_game(|game, ctx| Some(game.fire(timer, ctx)))
            .ok()
            .flatten()?;
        if timer.kind == TimerKind::ReturnToMenu {
            self.leave_game();
        }
        Some(effect)
    }
}
