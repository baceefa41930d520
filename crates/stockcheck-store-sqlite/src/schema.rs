//! SQL schema for the Stockcheck SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS items (
    item_id         TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    category        TEXT NOT NULL,
    sub_category    TEXT,
    shelf_life_days INTEGER NOT NULL DEFAULT 0 CHECK (shelf_life_days >= 0)
);

-- Observations are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS observations (
    observation_id TEXT PRIMARY KEY,
    item_id        TEXT,            -- NULL only for rows imported without a catalog entry
    item_name      TEXT,            -- snapshot at submission time
    category       TEXT,
    sub_category   TEXT,
    store          TEXT NOT NULL,
    shift          TEXT NOT NULL,
    staff          TEXT NOT NULL,
    quantity       INTEGER CHECK (quantity IS NULL OR quantity >= 0),
    expiry         TEXT NOT NULL,   -- as submitted; parsed on read
    created_at     TEXT NOT NULL    -- fixed-width RFC 3339 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS observations_store_recent_idx
    ON observations(store, created_at DESC);

PRAGMA user_version = 1;
";
