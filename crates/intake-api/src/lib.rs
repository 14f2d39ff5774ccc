//! JSON REST API for lead intake.
//!
//! Exposes an axum [`Router`] backed by a [`LeadService`]. Auth, TLS and
//! tracing layers are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = intake_api::api_router(Arc::new(service));
//! ```

pub mod error;
pub mod leads;

use std::sync::Arc;

use axum::{Router, routing::get};
use intake_core::{notify::Notifier, service::LeadService, store::LeadStore};

pub use error::ApiError;

/// Build the `/leads` router for `service`.
///
/// The collection routes answer both with and without the trailing slash.
pub fn api_router<S, N>(service: Arc<LeadService<S, N>>) -> Router<()>
where
  S: LeadStore + 'static,
  N: Notifier + 'static,
{
  Router::new()
    .route("/leads/", get(leads::list::<S, N>).post(leads::create::<S, N>))
    .route("/leads", get(leads::list::<S, N>).post(leads::create::<S, N>))
    .route(
      "/leads/{id}",
      get(leads::get_one::<S, N>).put(leads::update_state::<S, N>),
    )
    .with_state(service)
}
