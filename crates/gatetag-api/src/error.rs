//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. The `&'static str` payloads are
/// machine-readable reason codes rendered verbatim to clients.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation error: {0}")]
  Validation(&'static str),

  #[error("conflict: {0}")]
  Conflict(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("publish failed: {0}")]
  Publish(String),
}

impl From<gatetag_core::Error> for ApiError {
  fn from(e: gatetag_core::Error) -> Self {
    use gatetag_core::Error as Core;
    match e {
      Core::EmptyTagId => Self::Validation("missing_tag_id"),
      Core::InvalidStatus(_) => Self::Validation("invalid_status"),
      Core::AlreadyRegistered(_) => Self::Conflict("already_registered"),
      Core::Store(inner) => Self::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Validation(code) => {
        (StatusCode::BAD_REQUEST, json!({ "error": code }))
      }
      ApiError::Conflict(code) => (StatusCode::CONFLICT, json!({ "error": code })),
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "store_failure", "detail": e.to_string() }),
      ),
      ApiError::Publish(detail) => (
        StatusCode::BAD_GATEWAY,
        json!({ "error": "publish_failed", "detail": detail }),
      ),
    };
    (status, Json(body)).into_response()
  }
}
