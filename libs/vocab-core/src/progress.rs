//! Learned and difficult word bookkeeping backed by a durable store.

use crate::error::{Result, VocabError};
use crate::types::VocabularyItem;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

pub const LEARNED_KEY: &str = "vocab_learned";
pub const DIFFICULT_KEY: &str = "vocab_difficult";

/// String-keyed persistent storage.
pub trait DurableStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Remove every entry, not only the progress keys.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory store, used when nothing needs to survive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Aggregate numbers for the review screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressStats {
    pub learned_count: usize,
    pub difficult_count: usize,
    pub difficult: Vec<VocabularyItem>,
}

/// Owns the learned set and the difficult list.
///
/// Every mark writes through to the store immediately.
pub struct ProgressTracker<S: DurableStore> {
    store: S,
    learned: Vec<String>,
    difficult: Vec<VocabularyItem>,
}

impl<S: DurableStore> ProgressTracker<S> {
    /// Restore progress from `store`. Unparseable entries start empty.
    pub fn load(store: S) -> Result<Self> {
        let learned = read_json(&store, LEARNED_KEY)?;
        let difficult = read_json(&store, DIFFICULT_KEY)?;
        Ok(Self {
            store,
            learned,
            difficult,
        })
    }

    pub fn learned(&self) -> &[String] {
        &self.learned
    }

    pub fn difficult(&self) -> &[VocabularyItem] {
        &self.difficult
    }

    pub fn is_learned(&self, word: &str) -> bool {
        self.learned.iter().any(|w| w == word)
    }

    pub fn is_difficult(&self, word: &str) -> bool {
        self.difficult.iter().any(|i| i.word == word)
    }

    /// Returns whether the word was new. The set is persisted either way.
    pub fn mark_learned(&mut self, word: &str) -> Result<bool> {
        let inserted = !self.is_learned(word);
        if inserted {
            self.learned.push(word.to_string());
        }
        write_json(&mut self.store, LEARNED_KEY, &self.learned)?;
        Ok(inserted)
    }

    /// Returns whether the item was new (by word).
    pub fn mark_difficult(&mut self, item: &VocabularyItem) -> Result<bool> {
        let inserted = !self.is_difficult(&item.word);
        if inserted {
            self.difficult.push(item.clone());
        }
        write_json(&mut self.store, DIFFICULT_KEY, &self.difficult)?;
        Ok(inserted)
    }

    pub fn stats(&self) -> ProgressStats {
        ProgressStats {
            learned_count: self.learned.len(),
            difficult_count: self.difficult.len(),
            difficult: self.difficult.clone(),
        }
    }

    /// Wipe both collections and the whole backing store. Irreversible.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()?;
        self.learned.clear();
        self.difficult.clear();
        tracing::info!("progress reset");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn read_json<T: DeserializeOwned + Default>(store: &dyn DurableStore, key: &str) -> Result<T> {
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored progress");
            Ok(T::default())
        }
    }
}

fn write_json<T: Serialize + ?Sized>(store: &mut dyn DurableStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).map_err(|e| VocabError::Store(e.to_string()))?;
    store.set(key, &json)
}
