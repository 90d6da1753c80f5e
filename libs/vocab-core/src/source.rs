//! Topic catalog and content collaborator.

use crate::error::Result;
use crate::types::TopicRows;

/// Where topics come from.
///
/// Implementations report catalog failures as
/// [`VocabError::CatalogUnavailable`](crate::VocabError::CatalogUnavailable) and
/// fetch or parse failures as
/// [`VocabError::ContentUnreadable`](crate::VocabError::ContentUnreadable).
#[allow(async_fn_in_trait)]
pub trait TopicSource {
    /// Identifiers of every available topic, e.g. `animals.xlsx`.
    async fn list_topics(&self) -> Result<Vec<String>>;

    /// Raw rows of one topic.
    async fn fetch_rows(&self, topic: &str) -> Result<TopicRows>;
}
