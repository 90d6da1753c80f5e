//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid data: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DbError> for vocab_core::VocabError {
    fn from(e: DbError) -> Self {
        Self::Store(e.to_string())
    }
}
