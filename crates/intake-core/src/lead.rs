//! Lead types, the single entity of the intake service.
//!
//! A lead is created once per submission, read back by staff, and afterwards
//! only its `state` label ever changes. Leads are never deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The state every lead starts in.
pub const DEFAULT_STATE: &str = "PENDING";

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned integer identity of a lead.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct LeadId(pub i64);

impl fmt::Display for LeadId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A persisted prospect submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
  pub id:         LeadId,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub resume:     String,
  /// Free-text lifecycle label. Not validated against any fixed set.
  pub state:      String,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

// ─── NewLead ─────────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::LeadStore::create`].
///
/// `id`, `state` and `created_at` are always set by the store; they are not
/// accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
  first_name: String,
  last_name:  String,
  email:      String,
  resume:     String,
}

impl NewLead {
  /// Validate and build a creation input.
  ///
  /// Names must contain at least one non-whitespace character and `email` must
  /// be a syntactically valid address. `resume` is free-form and may be empty.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
    resume: impl Into<String>,
  ) -> Result<Self> {
    let first_name = first_name.into();
    let last_name = last_name.into();
    let email = email.into();

    if first_name.trim().is_empty() {
      return Err(Error::Validation("first_name must not be empty".into()));
    }
    if last_name.trim().is_empty() {
      return Err(Error::Validation("last_name must not be empty".into()));
    }
    email
      .parse::<lettre::Address>()
      .map_err(|e| Error::Validation(format!("invalid email {email:?}: {e}")))?;

    Ok(Self { first_name, last_name, email, resume: resume.into() })
  }

  pub fn first_name(&self) -> &str { &self.first_name }

  pub fn last_name(&self) -> &str { &self.last_name }

  pub fn email(&self) -> &str { &self.email }

  pub fn resume(&self) -> &str { &self.resume }
}
