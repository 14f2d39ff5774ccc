//! [`SqliteStore`]: the SQLite implementation of [`LeadStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use intake_core::{
  lead::{Lead, LeadId, NewLead},
  store::LeadStore,
};

use crate::{
  Error, Result,
  encode::{RawLead, encode_dt},
  schema::{LEAD_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store (useful for testing).
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// SQLite binds integers as `i64`; clamp windows that do not fit.
fn window_bound(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewLead) -> Result<Lead> {
    let first_name = input.first_name().to_owned();
    let last_name  = input.last_name().to_owned();
    let email      = input.email().to_owned();
    let resume     = input.resume().to_owned();
    let at_str     = encode_dt(Utc::now());

    // `state` is left to the column default.
    let raw: RawLead = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "INSERT INTO leads (first_name, last_name, email, resume, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           RETURNING {LEAD_COLUMNS}"
        );
        Ok(conn.query_row(
          &sql,
          rusqlite::params![first_name, last_name, email, resume, at_str],
          RawLead::from_row,
        )?)
      })
      .await?;

    raw.into_lead()
  }

  async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Lead>> {
    let skip_val  = window_bound(skip);
    let limit_val = window_bound(limit);

    let raws: Vec<RawLead> = self
      .conn
      .call(move |conn| {
        let sql =
          format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY id LIMIT ?1 OFFSET ?2");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val, skip_val], RawLead::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLead::into_lead).collect()
  }

  async fn get_by_id(&self, id: LeadId) -> Result<Option<Lead>> {
    let raw: Option<RawLead> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id.0], RawLead::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }

  async fn update_state(&self, id: LeadId, new_state: String) -> Result<Lead> {
    let raw: Option<RawLead> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE leads SET state = ?1 WHERE id = ?2",
          rusqlite::params![new_state, id.0],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let sql = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1");
        let raw = tx.query_row(&sql, rusqlite::params![id.0], RawLead::from_row)?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    match raw {
      Some(raw) => raw.into_lead(),
      None => {
        tracing::debug!(lead = %id, "state update for unknown lead");
        Err(Error::LeadNotFound(id))
      }
    }
  }
}
