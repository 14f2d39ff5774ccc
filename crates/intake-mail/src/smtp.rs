//! [`SmtpNotifier`] delivers notifications through a lettre transport.

use std::time::Duration;

use intake_core::notify::Notifier;
use lettre::{
  AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
  message::{Mailbox, MultiPart},
  transport::smtp::authentication::Credentials,
};

use crate::{
  MailConfig,
  error::{Error, Result, mailbox},
  message::{Composed, prospect_confirmation, staff_alert},
};

/// Sends each notification as a `multipart/alternative` message.
///
/// Generic over the transport so tests can swap in
/// [`lettre::transport::stub::AsyncStubTransport`].
pub struct SmtpNotifier<T = AsyncSmtpTransport<Tokio1Executor>> {
  transport: T,
  sender:    Mailbox,
  staff:     Mailbox,
}

impl SmtpNotifier {
  /// Build an authenticated STARTTLS submission transport from `config`.
  pub fn from_config(config: &MailConfig) -> Result<Self> {
    let transport =
      AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        .port(config.smtp_port)
        .credentials(Credentials::new(
          config.username.clone(),
          config.password.clone(),
        ))
        .timeout(config.timeout_secs.map(Duration::from_secs))
        .build();

    Self::new(transport, &config.sender, &config.staff_recipient)
  }
}

impl<T> SmtpNotifier<T>
where
  T: AsyncTransport + Send + Sync,
  T::Error: std::error::Error + Send + Sync + 'static,
{
  pub fn new(transport: T, sender: &str, staff_recipient: &str) -> Result<Self> {
    Ok(Self {
      transport,
      sender: mailbox(sender)?,
      staff: mailbox(staff_recipient)?,
    })
  }

  pub fn transport(&self) -> &T { &self.transport }

  async fn deliver(&self, to: Mailbox, composed: Composed) -> Result<()> {
    let recipient = to.email.to_string();
    let message = Message::builder()
      .from(self.sender.clone())
      .to(to)
      .subject(composed.subject)
      .multipart(MultiPart::alternative_plain_html(composed.plain, composed.html))?;

    self
      .transport
      .send(message)
      .await
      .map_err(|e| Error::Transport(Box::new(e)))?;

    tracing::debug!(%recipient, subject = composed.subject, "mail accepted by transport");
    Ok(())
  }
}

impl<T> Notifier for SmtpNotifier<T>
where
  T: AsyncTransport + Send + Sync,
  T::Error: std::error::Error + Send + Sync + 'static,
{
  type Error = Error;

  async fn notify_prospect(&self, email: &str, first_name: &str) -> Result<()> {
    self
      .deliver(mailbox(email)?, prospect_confirmation(first_name))
      .await
  }

  async fn notify_staff(
    &self,
    prospect_email: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<()> {
    self
      .deliver(
        self.staff.clone(),
        staff_alert(prospect_email, first_name, last_name),
      )
      .await
  }
}
