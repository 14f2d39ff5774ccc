//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use intake_core::lead::{Lead, LeadId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `leads` row exactly as SQLite returns it.
pub struct RawLead {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub resume:     String,
  pub state:      String,
  pub created_at: String,
}

impl RawLead {
  /// Map a row selected with [`LEAD_COLUMNS`](crate::schema::LEAD_COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      email:      row.get(3)?,
      resume:     row.get(4)?,
      state:      row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_lead(self) -> Result<Lead> {
    Ok(Lead {
      id:         LeadId(self.id),
      first_name: self.first_name,
      last_name:  self.last_name,
      email:      self.email,
      resume:     self.resume,
      state:      self.state,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
