//! SQL schema for the Skillbook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per document. `body` is the entity serialised as a flat JSON
-- object, including its own `id` field.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,   -- e.g. 'learning_progress', 'notifications'
    id          TEXT NOT NULL,
    body        TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);

-- Notifications are always looked up by recipient.
CREATE INDEX IF NOT EXISTS documents_user_idx
    ON documents(collection, json_extract(body, '$.userId'));

PRAGMA user_version = 1;
";
