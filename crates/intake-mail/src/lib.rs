//! Mail-backed [`Notifier`](intake_core::notify::Notifier) implementations.
//!
//! [`SmtpNotifier`] submits messages over authenticated SMTP; [`LogNotifier`]
//! only writes them to the log and is used when no SMTP settings exist.

mod config;
mod log;
mod message;
mod smtp;

pub mod error;

pub use config::MailConfig;
pub use error::{Error, Result};
pub use log::LogNotifier;
pub use message::{Composed, prospect_confirmation, staff_alert};
pub use smtp::SmtpNotifier;
