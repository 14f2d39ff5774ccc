//! HTTP server assembly for the lead intake service.
//!
//! Wraps the [`intake_api`] router with optional bearer authentication and
//! request tracing. The binary in `main.rs` loads [`ServerConfig`] and calls
//! [`router`].

pub mod auth;
pub mod error;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, middleware};
use intake_core::{
  notify::Notifier,
  service::{LeadService, NotifyPolicy},
  store::LeadStore,
};
use intake_mail::MailConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::{AuthConfig, require_bearer};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("./leads.db") }

/// Runtime server configuration, deserialised from `config.toml` and
/// `INTAKE_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  #[serde(default)]
  pub notify_policy:  NotifyPolicy,
  /// argon2 PHC string of the API token. Unset leaves `/leads` open.
  pub api_token_hash: Option<String>,
  /// SMTP settings. Unset routes notifications to the log.
  pub mail:           Option<MailConfig>,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn auth(&self) -> Option<AuthConfig> {
    self
      .api_token_hash
      .clone()
      .map(|token_hash| AuthConfig { token_hash })
  }
}

/// Layer `INTAKE_*` environment variables over an optional TOML file.
///
/// Nested keys use a double underscore, e.g. `INTAKE_MAIL__PASSWORD`.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  layered(path, environment())
}

fn environment() -> config::Environment {
  config::Environment::with_prefix("INTAKE")
    .prefix_separator("_")
    .separator("__")
}

fn layered(
  path: &Path,
  env: config::Environment,
) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(env)
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S, N>(service: Arc<LeadService<S, N>>, auth: Option<AuthConfig>) -> Router
where
  S: LeadStore + 'static,
  N: Notifier + 'static,
{
  let mut app = intake_api::api_router(service);
  if let Some(auth) = auth {
    app = app.layer(middleware::from_fn_with_state(Arc::new(auth), require_bearer));
  }
  app.layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
