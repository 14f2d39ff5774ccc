//! Error type for `intake-mail`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid mailbox {address:?}: {source}")]
  Address {
    address: String,
    #[source]
    source:  lettre::address::AddressError,
  },

  #[error("could not build message: {0}")]
  Build(#[from] lettre::error::Error),

  #[error("smtp setup error: {0}")]
  Setup(#[from] lettre::transport::smtp::Error),

  #[error("delivery failed: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parse `address` into a [`lettre::message::Mailbox`].
pub(crate) fn mailbox(address: &str) -> Result<lettre::message::Mailbox> {
  address.parse().map_err(|source| Error::Address {
    address: address.to_owned(),
    source,
  })
}
