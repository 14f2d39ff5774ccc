//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Internal failures never leak their cause to the caller; it is logged and a
//! generic body is returned instead.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::error::BoxError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("lead not found")]
  NotFound,

  #[error("invalid input: {0}")]
  Validation(String),

  #[error("internal error: {0}")]
  Internal(#[source] BoxError),
}

impl From<intake_core::Error> for ApiError {
  fn from(e: intake_core::Error) -> Self {
    match e {
      intake_core::Error::Validation(m) => ApiError::Validation(m),
      intake_core::Error::LeadNotFound(_) => ApiError::NotFound,
      other @ (intake_core::Error::Persistence(_)
      | intake_core::Error::Delivery { .. }) => ApiError::Internal(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, detail) = match &self {
      ApiError::NotFound => (StatusCode::NOT_FOUND, "Lead not found".to_owned()),
      ApiError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal Server Error".to_owned(),
        )
      }
    };
    (status, Json(json!({ "detail": detail }))).into_response()
  }
}
