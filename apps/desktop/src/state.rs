//! Application state.

use crate::catalog::Catalog;
use crate::db::SqliteRepository;
use crate::speech::CommandSpeaker;
use crate::timers::TimerScheduler;
use vocab_core::{Session, Topic};

pub type AppSession = Session<SqliteRepository, CommandSpeaker>;

/// Everything the command loop owns.
pub struct AppState {
    pub session: AppSession,
    pub catalog: Catalog,
    /// Last catalog listing, so topics can be loaded by number.
    pub topics: Vec<Topic>,
    pub timers: TimerScheduler,
}

impl AppState {
    pub fn new(session: AppSession, catalog: Catalog, timers: TimerScheduler) -> Self {
        Self {
            session,
            catalog,
            topics: Vec::new(),
            timers,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over an in-memory database with a deck of synthetic items.
    pub fn with_words(
        words: &[&str],
    ) -> (Self, tokio::sync::mpsc::UnboundedReceiver<vocab_core::Timer>) {
        use vocab_core::{SessionSettings, VocabularyItem};

        let repo = SqliteRepository::open_in_memory().unwrap();
        let mut session =
            Session::with_seed(repo, CommandSpeaker::new(None), SessionSettings::default(), 5).unwrap();
        let items = words
            .iter()
            .map(|w| VocabularyItem {
                word: w.to_string(),
                meaning: format!("meaning of {w}"),
                example: format!("Today's keyword is \"<strong>{w}</strong>\"."),
                synthetic: true,
            })
            .collect();
        session.load_items(Topic::from_id("test.csv"), items).unwrap();
        let (timers, elapsed) = TimerScheduler::new();
        let state = Self::new(session, Catalog::Directory(std::path::PathBuf::from(".")), timers);
        (state, elapsed)
    }
}
