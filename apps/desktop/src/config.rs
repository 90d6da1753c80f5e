//! Environment configuration.

use std::path::PathBuf;

/// Where the topic catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    Directory(PathBuf),
    Remote(String),
}

impl DataLocation {
    fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Remote(value.trim_end_matches('/').to_string())
        } else {
            Self::Directory(PathBuf::from(value))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data: DataLocation,
    pub db_path: PathBuf,
    /// Program (plus leading arguments) used to pronounce words.
    pub tts_command: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data = lookup("VOCAB_DATA").unwrap_or_else(|| "./data".into());
        let db_path = lookup("VOCAB_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let tts_command = lookup("VOCAB_TTS_COMMAND").filter(|c| !c.trim().is_empty());

        Self {
            data: DataLocation::parse(&data),
            db_path,
            tts_command,
        }
    }
}

fn default_db_path() -> PathBuf {
    // Use app data directory, fallback to current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab-trainer")
        .join("vocab.db")
}
