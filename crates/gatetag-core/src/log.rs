//! Audit log types.
//!
//! Log entries are immutable: one is created per accepted status-change
//! operation (including the unknown-tag case) and none is ever updated or
//! deleted. Creation order defines display order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The status recorded in a log entry.
///
/// `Unknown` marks a transition attempt on a tag with no registration. It
/// is a real third value, not an overloaded boolean, and serialises as
/// JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
  Active,
  Inactive,
  Unknown,
}

impl LogStatus {
  pub fn from_bool(status: bool) -> Self {
    if status { Self::Active } else { Self::Inactive }
  }

  /// `Some` for the two real statuses, `None` for the sentinel.
  pub fn as_bool(self) -> Option<bool> {
    match self {
      Self::Active => Some(true),
      Self::Inactive => Some(false),
      Self::Unknown => None,
    }
  }

  /// The scalar payload published on the bus for this status.
  pub fn signal(self) -> &'static str {
    match self {
      Self::Active => "1",
      Self::Inactive => "0",
      Self::Unknown => "-1",
    }
  }
}

// On the wire a log status is `true`, `false`, or `null` — the dashboard
// renders `null` as "unknown tag".
impl Serialize for LogStatus {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.as_bool().serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for LogStatus {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match Option::<bool>::deserialize(deserializer)? {
      Some(b) => Self::from_bool(b),
      None => Self::Unknown,
    })
  }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
  pub tag_id:    String,
  pub status:    LogStatus,
  /// Canonical `YYYY-MM-DD HH:MM:SS` string at the fixed reporting offset,
  /// assigned at write time by the clock normalizer.
  pub logged_at: String,
}
