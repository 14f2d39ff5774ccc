//! Bearer-token middleware and standalone verifier.
//!
//! The expected token is never stored in clear; only its argon2 PHC string
//! lives in configuration.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::HeaderMap,
  middleware::Next,
  response::{IntoResponse, Response},
};

use crate::error::Error;

/// Token accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub token_hash: String,
}

/// Verify the `Authorization: Bearer <token>` header against `config`.
pub fn verify_bearer(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let token = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .ok_or(Error::Unauthorized)?;

  let parsed_hash =
    PasswordHash::new(&config.token_hash).map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(token.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)
}

/// `axum::middleware::from_fn_with_state` adapter around [`verify_bearer`].
pub async fn require_bearer(
  State(config): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Response {
  match verify_bearer(req.headers(), &config) {
    Ok(()) => next.run(req).await,
    Err(e) => {
      tracing::debug!(uri = %req.uri(), "rejected unauthenticated request");
      e.into_response()
    }
  }
}
