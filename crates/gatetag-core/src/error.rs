//! Error types for `gatetag-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("tag id must not be empty")]
  EmptyTagId,

  #[error("tag {0:?} is already registered")]
  AlreadyRegistered(String),

  #[error("status value {0:?} is not coercible to a boolean")]
  InvalidStatus(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
