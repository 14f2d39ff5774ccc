//! The `LeadStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `intake-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::lead::{Lead, LeadId, NewLead};

/// Classification hook for backend errors.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` if the operation addressed a lead that does not exist.
  fn is_not_found(&self) -> bool;
}

/// Abstraction over a lead store backend.
///
/// Every mutating operation is durable before its future resolves; there is
/// no write-behind caching.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait LeadStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new lead. The store assigns `id`, sets `state` to
  /// [`DEFAULT_STATE`](crate::lead::DEFAULT_STATE) and stamps `created_at`.
  fn create(
    &self,
    input: NewLead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// Return at most `limit` leads in storage order after skipping `skip`.
  fn list(
    &self,
    skip: u64,
    limit: u64,
  ) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + '_;

  /// Retrieve a lead by id. Returns `None` if not found.
  fn get_by_id(
    &self,
    id: LeadId,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// Overwrite the `state` of an existing lead verbatim.
  ///
  /// Returns an error for which [`StoreError::is_not_found`] holds if `id` is
  /// unknown; the store is left unmodified in that case.
  fn update_state(
    &self,
    id: LeadId,
    new_state: String,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;
}
