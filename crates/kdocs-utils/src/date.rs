use jiff::{Timestamp, tz::TimeZone};
use log::warn;

/// Look up an IANA time zone, falling back to UTC when the name is unknown
/// or no time zone database is available.
#[must_use]
pub fn resolve_time_zone(name: &str) -> TimeZone {
  TimeZone::get(name).unwrap_or_else(|e| {
    warn!("Unknown time zone '{name}', using UTC: {e}");
    TimeZone::UTC
  })
}

/// Format a timestamp as a Korean calendar date, e.g. `2024년 5월 3일`.
#[must_use]
pub fn format_last_modified(timestamp: Timestamp, time_zone: &TimeZone) -> String {
  let date = timestamp.to_zoned(time_zone.clone()).date();
  format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}
