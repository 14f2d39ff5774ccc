//! [`LogNotifier`] renders notifications into the log instead of sending.

use std::convert::Infallible;

use intake_core::notify::Notifier;

use crate::message::{prospect_confirmation, staff_alert};

/// Used when no `[mail]` section is configured. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  type Error = Infallible;

  async fn notify_prospect(&self, email: &str, first_name: &str) -> Result<(), Infallible> {
    let m = prospect_confirmation(first_name);
    tracing::info!(to = email, subject = m.subject, body = %m.plain, "mail delivery disabled");
    Ok(())
  }

  async fn notify_staff(
    &self,
    prospect_email: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<(), Infallible> {
    let m = staff_alert(prospect_email, first_name, last_name);
    tracing::info!(to = "<staff>", subject = m.subject, body = %m.plain, "mail delivery disabled");
    Ok(())
  }
}
