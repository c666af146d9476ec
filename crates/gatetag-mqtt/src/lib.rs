//! MQTT implementation of the signal publisher gateway.
//!
//! The gateway owns a [`rumqttc::AsyncClient`] and spawns one background
//! task that drives the event loop, tracks connectivity through a watch
//! channel, and reconnects with a short delay after errors. Handlers only
//! ever see the read side of that channel.

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Incoming, MqttOptions, QoS};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::watch;

use gatetag_core::publish::{ConnectionState, SignalPublisher};

/// Delay before re-polling the event loop after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum Error {
  #[error("mqtt client error: {0}")]
  Client(#[from] rumqttc::ClientError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Broker connection settings, deserialised from the `[mqtt]` config table.
#[derive(Debug, Clone, Deserialize)]
pub struct MqttConfig {
  pub host:      String,
  #[serde(default = "default_port")]
  pub port:      u16,
  #[serde(default = "default_client_id")]
  pub client_id: String,
  /// Topic every status signal is published to.
  #[serde(default = "default_topic")]
  pub topic:     String,
}

fn default_port() -> u16 {
  1883
}

fn default_client_id() -> String {
  "gatetag-server".to_owned()
}

fn default_topic() -> String {
  "rfid/status".to_owned()
}

// ─── Publisher ───────────────────────────────────────────────────────────────

/// The MQTT-backed publisher gateway.
///
/// Cloning is cheap; all clones share the one client and connectivity
/// channel.
#[derive(Clone)]
pub struct MqttPublisher {
  client: AsyncClient,
  topic:  String,
  state:  watch::Receiver<ConnectionState>,
}

impl MqttPublisher {
  /// Create the gateway and spawn its event-loop driver task.
  ///
  /// Returns immediately in the `connecting` state; the driver task moves
  /// the state as the broker session progresses.
  pub fn connect(config: &MqttConfig) -> Self {
    let mut options =
      MqttOptions::new(&config.client_id, &config.host, config.port);
    options.set_keep_alive(Duration::from_secs(15));

    let (client, eventloop) = AsyncClient::new(options, 16);
    let (tx, rx) = watch::channel(ConnectionState::Connecting);
    tokio::spawn(drive(eventloop, tx));

    Self {
      client,
      topic: config.topic.clone(),
      state: rx,
    }
  }
}

impl SignalPublisher for MqttPublisher {
  type Error = Error;

  async fn publish(&self, payload: &str) -> Result<()> {
    self
      .client
      .publish(self.topic.clone(), QoS::AtLeastOnce, false, payload)
      .await?;
    Ok(())
  }

  fn connection_state(&self) -> ConnectionState {
    *self.state.borrow()
  }
}

/// Drive the event loop until every gateway handle has been dropped.
async fn drive(mut eventloop: EventLoop, state: watch::Sender<ConnectionState>) {
  loop {
    if state.is_closed() {
      return;
    }
    match eventloop.poll().await {
      Ok(Event::Incoming(Incoming::ConnAck(_))) => {
        tracing::info!("mqtt broker connected");
        let _ = state.send(ConnectionState::Connected);
      }
      Ok(Event::Incoming(Incoming::Disconnect)) => {
        tracing::info!("mqtt broker disconnected");
        let _ = state.send(ConnectionState::Disconnected);
      }
      Ok(_) => {}
      Err(e) => {
        tracing::warn!(error = %e, "mqtt connection error, retrying");
        let _ = state.send(ConnectionState::Error);
        tokio::time::sleep(RECONNECT_DELAY).await;
        let _ = state.send(ConnectionState::Connecting);
      }
    }
  }
}
