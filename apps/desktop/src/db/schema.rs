//! SQLite schema definitions.

/// Complete schema for local SQLite database.
pub const SCHEMA: &str = r#"
-- Key-value entries backing learning progress
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Session settings, kept apart so a progress reset leaves them alone
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    data TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
