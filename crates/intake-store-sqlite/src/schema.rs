//! SQL schema for the lead intake SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never deleted; only `state` is updated after insertion.
CREATE TABLE IF NOT EXISTS leads (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    resume      TEXT NOT NULL,
    state       TEXT NOT NULL DEFAULT 'PENDING',
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS leads_first_name_idx ON leads(first_name);
CREATE INDEX IF NOT EXISTS leads_last_name_idx  ON leads(last_name);
CREATE INDEX IF NOT EXISTS leads_email_idx      ON leads(email);

PRAGMA user_version = 1;
";

/// Column list shared by every query that materialises a [`RawLead`].
///
/// [`RawLead`]: crate::encode::RawLead
pub const LEAD_COLUMNS: &str =
  "id, first_name, last_name, email, resume, state, created_at";
