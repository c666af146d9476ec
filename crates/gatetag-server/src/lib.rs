//! HTTP server assembly for the gatetag service.
//!
//! Wires the SQLite store, the MQTT gateway, and the reconciler into one
//! axum [`Router`], and defines the configuration the binary deserialises
//! from `config.toml`.

use std::path::PathBuf;

use axum::Router;
use gatetag_api::ApiState;
use gatetag_core::{
  publish::SignalPublisher,
  store::{LogStore, RegistrationStore},
};
use gatetag_mqtt::MqttConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `GATETAG_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Seconds before an in-flight publish is abandoned and reported as a
  /// soft failure.
  #[serde(default = "default_publish_timeout_secs")]
  pub publish_timeout_secs: u64,
  pub mqtt:       MqttConfig,
}

fn default_publish_timeout_secs() -> u64 {
  3
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the JSON API nested under `/api`,
/// with request tracing.
pub fn router<R, L, P>(state: ApiState<R, L, P>) -> Router
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  Router::new()
    .nest("/api", gatetag_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
