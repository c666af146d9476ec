//! Handlers for `/logs` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/logs` | All entries, newest first; `status` is `true\|false\|null` |
//! | `POST` | `/logs/test-publish` | Connectivity diagnostics; bypasses the reconciler |

use axum::{Json, extract::State};
use gatetag_core::{
  log::LogEntry,
  publish::SignalPublisher,
  reconcile::DEFAULT_PUBLISH_TIMEOUT,
  store::{LogStore, RegistrationStore},
};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /logs`
pub async fn list<R, L, P>(
  State(state): State<ApiState<R, L, P>>,
) -> Result<Json<Vec<LogEntry>>, ApiError>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  let entries = state
    .logs
    .list_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}

// ─── Test publish ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TestPublishBody {
  pub message: Option<String>,
}

/// `POST /logs/test-publish` — forwards `message` verbatim to the gateway.
///
/// Diagnostics only: no registration or log state is touched. Unlike the
/// reconciler's publishes, a failure here is the whole point of the call,
/// so it surfaces as a 502 rather than a warning.
pub async fn test_publish<R, L, P>(
  State(state): State<ApiState<R, L, P>>,
  Json(body): Json<TestPublishBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  let message = body
    .message
    .filter(|m| !m.is_empty())
    .ok_or(ApiError::Validation("missing_message"))?;

  match tokio::time::timeout(
    DEFAULT_PUBLISH_TIMEOUT,
    state.publisher.publish(&message),
  )
  .await
  {
    Ok(Ok(())) => Ok(Json(json!({ "published": true }))),
    Ok(Err(e)) => Err(ApiError::Publish(e.to_string())),
    Err(_) => Err(ApiError::Publish("publish timed out".to_owned())),
  }
}
