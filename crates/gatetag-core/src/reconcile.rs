//! The status reconciler — validate → persist → log → publish.
//!
//! One call produces at most one registration mutation, exactly one audit
//! entry (best-effort), and exactly one outbound signal:
//!
//! | case | registration | log status | signal |
//! |------|--------------|------------|--------|
//! | tag registered, requested active   | updated | `true`  | `"1"`  |
//! | tag registered, requested inactive | updated | `false` | `"0"`  |
//! | tag not registered                 | untouched | `null` | `"-1"` |
//!
//! The registration store is authoritative. A log append that fails after
//! the update committed, or a publish that fails or times out, degrades to
//! a [`Warning`] on an otherwise successful result.

use std::{collections::HashMap, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
  clock,
  error::{Error, Result},
  log::{LogEntry, LogStatus},
  publish::SignalPublisher,
  registration::Registration,
  store::{InsertOutcome, LogStore, RegistrationStore},
};

/// Bound on how long a publish may delay the caller.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(3);

// ─── Results ─────────────────────────────────────────────────────────────────

/// What the reconciler decided for one status-change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
  /// The registration existed and its status was set — possibly to the
  /// value it already had; repeats are not debounced, because downstream
  /// hardware may need the repeated signal.
  Updated { previous: bool, current: bool },
  /// No registration exists for the tag. Still logged (with the
  /// unknown-status sentinel) and still published, but never created.
  NotFound,
}

/// A side effect that failed after the authoritative state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Warning {
  LogAppendFailed(String),
  PublishFailed(String),
}

/// The full result of one [`Reconciler::reconcile`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
  #[serde(flatten)]
  pub outcome:  ReconcileOutcome,
  /// The audit entry written for this transition, if the append succeeded.
  pub entry:    Option<LogEntry>,
  pub warnings: Vec<Warning>,
}

/// The result of one [`Reconciler::register`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registered {
  pub registration: Registration,
  pub entry:        Option<LogEntry>,
  pub warnings:     Vec<Warning>,
}

// ─── Per-key locks ───────────────────────────────────────────────────────────

/// An explicit per-key mutex map. Operations on the same tag are serialized
/// end to end; operations on distinct tags are unordered relative to each
/// other.
#[derive(Default)]
struct KeyLocks {
  inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
  async fn acquire(&self, key: &str) -> Arc<Mutex<()>> {
    let mut map = self.inner.lock().await;
    map.entry(key.to_owned()).or_default().clone()
  }
}

// ─── Reconciler ──────────────────────────────────────────────────────────────

/// The status-change pipeline. Owns the per-key locks and the publish
/// timeout, and drives the store, the log, and the gateway in order.
pub struct Reconciler<R, L, P> {
  registrations:   Arc<R>,
  logs:            Arc<L>,
  publisher:       Arc<P>,
  locks:           KeyLocks,
  publish_timeout: Duration,
}

impl<R, L, P> Reconciler<R, L, P>
where
  R: RegistrationStore,
  L: LogStore,
  P: SignalPublisher,
{
  pub fn new(registrations: Arc<R>, logs: Arc<L>, publisher: Arc<P>) -> Self {
    Self::with_publish_timeout(
      registrations,
      logs,
      publisher,
      DEFAULT_PUBLISH_TIMEOUT,
    )
  }

  pub fn with_publish_timeout(
    registrations:   Arc<R>,
    logs:            Arc<L>,
    publisher:       Arc<P>,
    publish_timeout: Duration,
  ) -> Self {
    Self {
      registrations,
      logs,
      publisher,
      locks: KeyLocks::default(),
      publish_timeout,
    }
  }

  /// Provision a new registration and write its initial audit entry.
  ///
  /// Fails with [`Error::AlreadyRegistered`] (and no side effects) if the
  /// id is taken. No signal is published — provisioning is not a live
  /// transition.
  pub async fn register(
    &self,
    tag_id:         &str,
    initial_status: bool,
  ) -> Result<Registered> {
    if tag_id.is_empty() {
      return Err(Error::EmptyTagId);
    }
    let lock = self.locks.acquire(tag_id).await;
    let _guard = lock.lock().await;

    match self
      .registrations
      .insert_if_absent(tag_id, initial_status)
      .await
      .map_err(box_store_err)?
    {
      InsertOutcome::AlreadyExists => {
        Err(Error::AlreadyRegistered(tag_id.to_owned()))
      }
      InsertOutcome::Created => {
        let mut warnings = Vec::new();
        let entry = self
          .append_entry(tag_id, LogStatus::from_bool(initial_status), &mut warnings)
          .await;
        tracing::info!(tag_id, status = initial_status, "tag registered");
        Ok(Registered {
          registration: Registration {
            tag_id: tag_id.to_owned(),
            status: initial_status,
          },
          entry,
          warnings,
        })
      }
    }
  }

  /// Apply a requested status to a tag: update the registration if one
  /// exists, append the audit entry, and publish exactly one signal
  /// reflecting the outcome.
  ///
  /// An unregistered tag is a defined outcome, not an error: no
  /// registration is created, the entry carries [`LogStatus::Unknown`],
  /// and `"-1"` goes out on the bus.
  pub async fn reconcile(
    &self,
    tag_id:           &str,
    requested_status: bool,
  ) -> Result<Reconciliation> {
    if tag_id.is_empty() {
      return Err(Error::EmptyTagId);
    }
    let lock = self.locks.acquire(tag_id).await;
    let _guard = lock.lock().await;

    let previous = self
      .registrations
      .update_if_present(tag_id, requested_status)
      .await
      .map_err(box_store_err)?;

    let (outcome, status) = match previous {
      Some(previous) => (
        ReconcileOutcome::Updated { previous, current: requested_status },
        LogStatus::from_bool(requested_status),
      ),
      None => {
        tracing::info!(tag_id, "status change for unregistered tag");
        (ReconcileOutcome::NotFound, LogStatus::Unknown)
      }
    };

    let mut warnings = Vec::new();
    let entry = self.append_entry(tag_id, status, &mut warnings).await;
    self.publish_signal(status.signal(), &mut warnings).await;

    Ok(Reconciliation { outcome, entry, warnings })
  }

  /// Append one audit entry stamped "now". Failure degrades to a warning:
  /// the registration state is authoritative and is not rolled back.
  async fn append_entry(
    &self,
    tag_id:   &str,
    status:   LogStatus,
    warnings: &mut Vec<Warning>,
  ) -> Option<LogEntry> {
    let entry = LogEntry {
      tag_id:    tag_id.to_owned(),
      status,
      logged_at: clock::now_stamp(),
    };
    match self.logs.append(entry.clone()).await {
      Ok(()) => Some(entry),
      Err(e) => {
        tracing::warn!(tag_id, error = %e, "audit log append failed");
        warnings.push(Warning::LogAppendFailed(e.to_string()));
        None
      }
    }
  }

  /// Publish after the store/log steps, under the configured timeout.
  /// Failure or timeout is a soft warning, never an error.
  async fn publish_signal(&self, payload: &str, warnings: &mut Vec<Warning>) {
    match tokio::time::timeout(
      self.publish_timeout,
      self.publisher.publish(payload),
    )
    .await
    {
      Ok(Ok(())) => {}
      Ok(Err(e)) => {
        tracing::warn!(payload, error = %e, "signal publish failed");
        warnings.push(Warning::PublishFailed(e.to_string()));
      }
      Err(_) => {
        tracing::warn!(payload, "signal publish timed out");
        warnings.push(Warning::PublishFailed("publish timed out".to_owned()));
      }
    }
  }
}

fn box_store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
