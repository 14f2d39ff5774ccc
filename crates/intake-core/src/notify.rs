//! The `Notifier` trait: outbound messages fired when a lead is created.
//!
//! Implementations live in `intake-mail`. Each call resolves once the
//! transport has accepted (or refused) the message; nothing is queued.

use std::future::Future;

pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Acknowledge a submission to the prospect at `email`.
  fn notify_prospect<'a>(
    &'a self,
    email: &'a str,
    first_name: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Alert the internal staff recipient about a new prospect.
  fn notify_staff<'a>(
    &'a self,
    prospect_email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
