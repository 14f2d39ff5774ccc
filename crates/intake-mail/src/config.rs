use std::fmt;

use serde::Deserialize;

fn default_smtp_host() -> String { "smtp.gmail.com".to_owned() }

fn default_smtp_port() -> u16 { 587 }

/// SMTP submission settings, deserialised from the `[mail]` config section.
#[derive(Deserialize, Clone)]
pub struct MailConfig {
  #[serde(default = "default_smtp_host")]
  pub smtp_host:       String,
  #[serde(default = "default_smtp_port")]
  pub smtp_port:       u16,
  pub username:        String,
  pub password:        String,
  /// Address every message is sent from.
  pub sender:          String,
  /// Fixed internal address that receives new-lead alerts.
  pub staff_recipient: String,
  /// Per-command SMTP timeout. Unset means lettre's default.
  pub timeout_secs:    Option<u64>,
}

impl fmt::Debug for MailConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MailConfig")
      .field("smtp_host", &self.smtp_host)
      .field("smtp_port", &self.smtp_port)
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("sender", &self.sender)
      .field("staff_recipient", &self.staff_recipient)
      .field("timeout_secs", &self.timeout_secs)
      .finish()
  }
}
