//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` preserves insertion order for listings.
CREATE TABLE IF NOT EXISTS contacts (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id    TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    company       TEXT NOT NULL,
    phone         TEXT,
    title         TEXT,
    country       TEXT,
    industry      TEXT,
    notes         TEXT,
    tags          TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    date_added    TEXT,                        -- RFC 3339 or YYYY-MM-DD
    date_modified TEXT,
    date_created  TEXT,
    last_opened   TEXT
);

PRAGMA user_version = 1;
";
