//! Registration — the current status record for a physical tag.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The live status record for one RFID tag.
///
/// At most one registration exists per `tag_id`. The id is immutable once
/// created; `status` is mutated only by the reconciler, via the store's
/// atomic update operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
  pub tag_id: String,
  pub status: bool,
}

/// A requested status as it arrives at the request boundary: a JSON
/// boolean, the strings `"true"`/`"false"`, or the numbers `1`/`0`.
/// Any other value is a validation error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatusFlag {
  Bool(bool),
  Number(i64),
  Text(String),
}

impl StatusFlag {
  /// Coerce to a boolean, rejecting anything outside the accepted forms.
  pub fn into_bool(self) -> Result<bool> {
    match self {
      Self::Bool(b) => Ok(b),
      Self::Number(1) => Ok(true),
      Self::Number(0) => Ok(false),
      Self::Number(n) => Err(Error::InvalidStatus(n.to_string())),
      Self::Text(s) => match s.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::InvalidStatus(s)),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn coerce(json: &str) -> Result<bool> {
    serde_json::from_str::<StatusFlag>(json).unwrap().into_bool()
  }

  #[test]
  fn accepts_booleans_strings_and_unit_numbers() {
    assert_eq!(coerce("true").unwrap(), true);
    assert_eq!(coerce("false").unwrap(), false);
    assert_eq!(coerce("\"true\"").unwrap(), true);
    assert_eq!(coerce("\"false\"").unwrap(), false);
    assert_eq!(coerce("1").unwrap(), true);
    assert_eq!(coerce("0").unwrap(), false);
  }

  #[test]
  fn rejects_everything_else() {
    assert!(matches!(coerce("2"), Err(Error::InvalidStatus(_))));
    assert!(matches!(coerce("-1"), Err(Error::InvalidStatus(_))));
    assert!(matches!(coerce("\"yes\""), Err(Error::InvalidStatus(_))));
    assert!(matches!(coerce("\"TRUE\""), Err(Error::InvalidStatus(_))));
  }
}
