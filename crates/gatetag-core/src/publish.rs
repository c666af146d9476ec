//! The outbound signal boundary.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Connectivity lifecycle of the message-bus gateway.
///
/// Normal progression is `disconnected → connecting → connected`; `error`
/// is reachable from any state. Handlers observe this only through the
/// read-only status query — never through shared mutable globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
  Disconnected,
  Connecting,
  Connected,
  Error,
}

/// A message-bus gateway able to deliver one scalar payload at a time.
///
/// `publish` is best-effort: implementations return an error rather than
/// panic, and callers treat failure as a soft warning. The reconciler
/// additionally bounds every call with its own timeout, so a stalled
/// gateway can never hold up a response.
pub trait SignalPublisher: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn publish<'a>(
    &'a self,
    payload: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Current connectivity state, maintained by the gateway's own machinery.
  fn connection_state(&self) -> ConnectionState;
}
