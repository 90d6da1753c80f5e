//! Topic catalog backed by a local directory or an HTTP server.
//!
//! Both layouts are the same: `topics.json` (an array of topic file names)
//! at the root, and each topic file next to it.

use crate::config::DataLocation;
use crate::workbook;
use reqwest::Client;
use std::path::PathBuf;
use vocab_core::{Result, TopicRows, TopicSource, VocabError};

pub const CATALOG_FILE: &str = "topics.json";

pub enum Catalog {
    Directory(PathBuf),
    Remote { base_url: String, client: Client },
}

impl Catalog {
    pub fn new(location: &DataLocation) -> Self {
        match location {
            DataLocation::Directory(path) => Self::Directory(path.clone()),
            DataLocation::Remote(url) => Self::Remote {
                base_url: url.clone(),
                client: Client::new(),
            },
        }
    }

    async fn read(&self, name: &str) -> std::result::Result<Vec<u8>, String> {
        match self {
            Self::Directory(root) => tokio::fs::read(root.join(name))
                .await
                .map_err(|e| format!("{name}: {e}")),
            Self::Remote { base_url, client } => {
                let url = format!("{base_url}/{name}");
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| format!("{url}: {e}"))?;
                let bytes = response.bytes().await.map_err(|e| format!("{url}: {e}"))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

/// Topic ids are plain file names inside the catalog root.
fn check_topic_id(topic: &str) -> Result<()> {
    if topic.is_empty() || topic.contains(['/', '\\']) || topic.contains("..") {
        return Err(VocabError::ContentUnreadable(format!("invalid topic id {topic:?}")));
    }
    Ok(())
}

impl TopicSource for Catalog {
    async fn list_topics(&self) -> Result<Vec<String>> {
        let bytes = self.read(CATALOG_FILE).await.map_err(VocabError::CatalogUnavailable)?;
        let topics: Vec<String> = serde_json::from_slice(&bytes)
            .map_err(|e| VocabError::CatalogUnavailable(format!("{CATALOG_FILE}: {e}")))?;
        tracing::debug!(count = topics.len(), "catalog read");
        Ok(topics)
    }

    async fn fetch_rows(&self, topic: &str) -> Result<TopicRows> {
        check_topic_id(topic)?;
        let bytes = self.read(topic).await.map_err(VocabError::ContentUnreadable)?;
        workbook::parse(topic, &bytes).map_err(|e| VocabError::ContentUnreadable(format!("{topic}: {e}")))
    }
}
