//! Handler for `/mqtt/status`.

use axum::{Json, extract::State};
use gatetag_core::{
  publish::{ConnectionState, SignalPublisher},
  store::{LogStore, RegistrationStore},
};
use serde::Serialize;

use crate::ApiState;

#[derive(Debug, Serialize)]
pub struct ConnectivityStatus {
  pub status: ConnectionState,
}

/// `GET /mqtt/status` — the gateway's current connectivity state.
///
/// Recomputed on every poll; dashboards are expected to fetch this on a
/// longer interval than the registration and log lists.
pub async fn status<R, L, P>(
  State(state): State<ApiState<R, L, P>>,
) -> Json<ConnectivityStatus>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  Json(ConnectivityStatus {
    status: state.publisher.connection_state(),
  })
}
