//! Wall-clock normalisation for log timestamps.
//!
//! All log entries carry a canonical second-precision timestamp at a fixed
//! UTC+8 reporting offset. The offset is applied at write time — the stored
//! string is the literal log value, independent of the host timezone.

use chrono::{DateTime, FixedOffset, Utc};

/// Hours east of UTC for the fixed reporting offset.
pub const REPORTING_OFFSET_HOURS: i32 = 8;

/// Format for persisted timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn reporting_offset() -> FixedOffset {
  FixedOffset::east_opt(REPORTING_OFFSET_HOURS * 3600)
    .expect("UTC+8 is a valid offset")
}

/// Format an instant as the canonical timestamp string.
pub fn format_stamp(at: DateTime<Utc>) -> String {
  at.with_timezone(&reporting_offset())
    .format(TIMESTAMP_FORMAT)
    .to_string()
}

/// The canonical timestamp for the current instant.
pub fn now_stamp() -> String {
  format_stamp(Utc::now())
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn formats_at_reporting_offset() {
    // 16:30 UTC is 00:30 the next day at UTC+8.
    let at = Utc.with_ymd_and_hms(2024, 3, 10, 16, 30, 5).unwrap();
    assert_eq!(format_stamp(at), "2024-03-11 00:30:05");
  }

  #[test]
  fn stamp_has_no_offset_suffix_or_subseconds() {
    let stamp = now_stamp();
    assert_eq!(stamp.len(), 19, "stamp: {stamp}");
    assert!(!stamp.contains('T'));
    assert!(!stamp.contains('+'));
  }

  #[test]
  fn back_to_back_stamps_are_non_decreasing() {
    let a = now_stamp();
    let b = now_stamp();
    assert!(a <= b);
  }
}
