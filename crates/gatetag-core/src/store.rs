//! The store traits implemented by storage backends.
//!
//! Backends (e.g. `gatetag-store-sqlite`) implement these; higher layers
//! depend on the abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{log::LogEntry, registration::Registration};

/// Outcome of [`RegistrationStore::insert_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
  Created,
  AlreadyExists,
}

/// Abstraction over the registration store: `tag_id` → current status.
///
/// Every operation is atomic with respect to concurrent callers on the same
/// `tag_id`; nothing is guaranteed across distinct ids.
pub trait RegistrationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a registration by tag id. Returns `None` if not found.
  fn find<'a>(
    &'a self,
    tag_id: &'a str,
  ) -> impl Future<Output = Result<Option<Registration>, Self::Error>> + Send + 'a;

  /// Create a registration unless the id is already taken.
  fn insert_if_absent<'a>(
    &'a self,
    tag_id: &'a str,
    status: bool,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + 'a;

  /// Set the status of an existing registration, returning the previous
  /// status, or `None` if no registration exists. Never creates one.
  fn update_if_present<'a>(
    &'a self,
    tag_id: &'a str,
    status: bool,
  ) -> impl Future<Output = Result<Option<bool>, Self::Error>> + Send + 'a;

  /// All registrations.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Registration>, Self::Error>> + Send + '_;

  /// Registrations whose status equals `status`.
  fn list_by_status(
    &self,
    status: bool,
  ) -> impl Future<Output = Result<Vec<Registration>, Self::Error>> + Send + '_;
}

/// Abstraction over the append-only audit log.
pub trait LogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one entry. Entries are never reordered, mutated, or deleted.
  fn append(
    &self,
    entry: LogEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All entries, newest first: timestamp descending, ties broken by most
  /// recent insertion first.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<LogEntry>, Self::Error>> + Send + '_;
}
