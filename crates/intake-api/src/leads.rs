//! Handlers for `/leads` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/leads/` | `?skip` (default 0), `?limit` (default 10, ≥ 1) |
//! | `POST` | `/leads/` | Body: [`CreateBody`]; persists, then notifies |
//! | `GET`  | `/leads/{id}` | 404 if not found |
//! | `PUT`  | `/leads/{id}` | Body: `{"state":"..."}`; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use intake_core::{
  lead::{Lead, LeadId, NewLead},
  notify::Notifier,
  service::LeadService,
  store::LeadStore,
};
use serde::Deserialize;

use crate::error::ApiError;

type Service<S, N> = State<Arc<LeadService<S, N>>>;

// ─── List ─────────────────────────────────────────────────────────────────────

fn default_limit() -> u64 { 10 }

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub skip:  u64,
  #[serde(default = "default_limit")]
  pub limit: u64,
}

/// `GET /leads/[?skip=<n>][&limit=<n>]`
pub async fn list<S, N>(
  State(service): Service<S, N>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Lead>>, ApiError>
where
  S: LeadStore,
  N: Notifier,
{
  let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
  let leads = service.list_leads(params.skip, params.limit).await?;
  Ok(Json(leads))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /leads/`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub resume:     String,
}

impl TryFrom<CreateBody> for NewLead {
  type Error = intake_core::Error;

  fn try_from(b: CreateBody) -> Result<Self, Self::Error> {
    NewLead::new(b.first_name, b.last_name, b.email, b.resume)
  }
}

/// `POST /leads/` returns 200 + the stored [`Lead`].
pub async fn create<S, N>(
  State(service): Service<S, N>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
  N: Notifier,
{
  let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
  let input = NewLead::try_from(body)?;
  let lead = service.submit_lead(input).await?;
  Ok(Json(lead))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /leads/{id}`
pub async fn get_one<S, N>(
  State(service): Service<S, N>,
  Path(id): Path<i64>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
  N: Notifier,
{
  let lead = service.get_lead(LeadId(id)).await?;
  Ok(Json(lead))
}

// ─── Update state ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateStateBody {
  pub state: String,
}

/// `PUT /leads/{id}` with body `{"state":"REVIEWED"}`
pub async fn update_state<S, N>(
  State(service): Service<S, N>,
  Path(id): Path<i64>,
  body: Result<Json<UpdateStateBody>, JsonRejection>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore,
  N: Notifier,
{
  let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
  let lead = service.change_state(LeadId(id), body.state).await?;
  Ok(Json(lead))
}
