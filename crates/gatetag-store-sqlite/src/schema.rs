//! SQL schema for the gatetag SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS registrations (
    tag_id TEXT PRIMARY KEY,
    status INTEGER NOT NULL    -- 1 = active, 0 = inactive
);

-- Log entries are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS logs (
    entry_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    tag_id    TEXT NOT NULL,   -- no FK: unknown tags are logged too
    status    INTEGER,         -- 1 | 0 | NULL (unknown-status sentinel)
    logged_at TEXT NOT NULL    -- 'YYYY-MM-DD HH:MM:SS' at the reporting offset
);

CREATE INDEX IF NOT EXISTS logs_logged_at_idx ON logs(logged_at);

PRAGMA user_version = 1;
";
