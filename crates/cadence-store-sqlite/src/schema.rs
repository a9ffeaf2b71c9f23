//! SQL schema for the Cadence SQLite store.
//!
//! Executed at every connection startup; future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS routines (
    routine_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    community   TEXT NOT NULL,
    channel     TEXT NOT NULL,
    recurrence  TEXT NOT NULL,   -- free-text description, e.g. 'MWF'
    hour        INTEGER NOT NULL,
    minute      INTEGER NOT NULL,
    timezone    TEXT NOT NULL,   -- IANA zone name; pre-validated upstream
    role        TEXT,
    context     TEXT,
    scheduler   TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Slots carry a copy of the routine fields they need. They are never
-- updated when their routine changes; deletes leave them in place.
CREATE TABLE IF NOT EXISTS routine_slots (
    slot_id        TEXT PRIMARY KEY,
    routine_id     INTEGER NOT NULL,
    community      TEXT NOT NULL,
    channel        TEXT NOT NULL,
    name           TEXT NOT NULL,
    day            INTEGER NOT NULL,   -- ordinal day of year, UTC
    year           INTEGER NOT NULL,
    hour           INTEGER NOT NULL,   -- UTC
    minute         INTEGER NOT NULL,
    role           TEXT,
    scheduler      TEXT NOT NULL,
    thread_content TEXT,
    origin         TEXT NOT NULL       -- JSON back-reference; opaque
);

CREATE INDEX IF NOT EXISTS routines_scope_idx
  ON routines(community, channel);
CREATE INDEX IF NOT EXISTS slots_routine_idx
  ON routine_slots(community, channel, routine_id);

PRAGMA user_version = 1;
";
