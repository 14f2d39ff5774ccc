//! Error type for `intake-store-sqlite`.

use intake_core::{lead::LeadId, store::StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to update a lead that does not exist.
  #[error("lead not found: {0}")]
  LeadNotFound(LeadId),
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Self::LeadNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
