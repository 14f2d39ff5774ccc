//! Error types for `intake-core`.

use thiserror::Error;

use crate::lead::LeadId;

/// A boxed error from a collaborator (store backend or mail transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  Validation(String),

  #[error("lead not found: {0}")]
  LeadNotFound(LeadId),

  #[error("persistence error: {0}")]
  Persistence(#[source] BoxError),

  /// The lead was committed but a notification could not be delivered.
  #[error("delivery error for lead {lead}: {source}")]
  Delivery {
    lead:   LeadId,
    #[source]
    source: BoxError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
