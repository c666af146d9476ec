//! JSON REST API for the gatetag service.
//!
//! Exposes an axum [`Router`] backed by any [`RegistrationStore`] /
//! [`LogStore`] / [`SignalPublisher`] combination. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", gatetag_api::api_router(state.clone()))
//! ```

pub mod error;
pub mod logs;
pub mod mqtt;
pub mod registrations;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use gatetag_core::{
  publish::SignalPublisher,
  reconcile::Reconciler,
  store::{LogStore, RegistrationStore},
};

pub use error::ApiError;

/// Shared state threaded through all handlers.
///
/// Writes go through the reconciler; reads hit the stores directly, so
/// polling clients never contend with the per-key locks.
pub struct ApiState<R, L, P> {
  pub reconciler:    Arc<Reconciler<R, L, P>>,
  pub registrations: Arc<R>,
  pub logs:          Arc<L>,
  pub publisher:     Arc<P>,
}

impl<R, L, P> Clone for ApiState<R, L, P> {
  fn clone(&self) -> Self {
    Self {
      reconciler:    self.reconciler.clone(),
      registrations: self.registrations.clone(),
      logs:          self.logs.clone(),
      publisher:     self.publisher.clone(),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<R, L, P>(state: ApiState<R, L, P>) -> Router<()>
where
  R: RegistrationStore + 'static,
  L: LogStore + 'static,
  P: SignalPublisher + 'static,
{
  Router::new()
    // Registrations
    .route(
      "/registrations",
      get(registrations::list::<R, L, P>).post(registrations::create::<R, L, P>),
    )
    .route(
      "/registrations/status",
      put(registrations::update_status::<R, L, P>),
    )
    // Logs
    .route("/logs", get(logs::list::<R, L, P>))
    .route("/logs/test-publish", post(logs::test_publish::<R, L, P>))
    // Bus connectivity
    .route("/mqtt/status", get(mqtt::status::<R, L, P>))
    .with_state(state)
}
