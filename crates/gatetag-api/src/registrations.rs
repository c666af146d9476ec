//! Handlers for `/registrations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/registrations` | Optional `?status=true\|false` filter |
//! | `POST` | `/registrations` | Body: `{"tag_id":"...","status":true}`; status defaults to active |
//! | `PUT`  | `/registrations/status` | Runs the reconciler; `not_found` is a success outcome |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use gatetag_core::{
  publish::SignalPublisher,
  reconcile::{Reconciliation, Registered},
  registration::{Registration, StatusFlag},
  store::{LogStore, RegistrationStore},
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<bool>,
}

/// `GET /registrations[?status=true|false]`
pub async fn list<R, L, P>(
  State(state): State<ApiState<R, L, P>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Registration>>, ApiError>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  let registrations = match params.status {
    Some(status) => state.registrations.list_by_status(status).await,
    None => state.registrations.list_all().await,
  }
  .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(registrations))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub tag_id: Option<String>,
  /// Defaults to active when omitted.
  pub status: Option<StatusFlag>,
}

/// `POST /registrations` — provisions a tag and writes its initial log
/// entry. No signal is published.
pub async fn create<R, L, P>(
  State(state): State<ApiState<R, L, P>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  // An absent tag_id falls through to the reconciler's empty-id check,
  // which maps to the `missing_tag_id` reason code.
  let tag_id = body.tag_id.unwrap_or_default();
  let status = match body.status {
    Some(flag) => flag.into_bool()?,
    None => true,
  };

  let registered: Registered = state.reconciler.register(&tag_id, status).await?;
  Ok((StatusCode::CREATED, Json(registered)))
}

// ─── Update status ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
  pub tag_id: Option<String>,
  pub status: Option<StatusFlag>,
}

/// `PUT /registrations/status` — body: `{"tag_id":"...","status":...}`.
///
/// Responds 200 for both outcomes; the payload's `outcome` field
/// distinguishes `updated` from `not_found`, and `warnings` carries any
/// degraded side effects.
pub async fn update_status<R, L, P>(
  State(state): State<ApiState<R, L, P>>,
  Json(body): Json<UpdateStatusBody>,
) -> Result<Json<Reconciliation>, ApiError>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  let tag_id = body.tag_id.unwrap_or_default();
  let status = body
    .status
    .ok_or(ApiError::Validation("missing_status"))?
    .into_bool()?;

  let result = state.reconciler.reconcile(&tag_id, status).await?;
  Ok(Json(result))
}
