use chrono::{
  DateTime,
  Utc
};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Age of `timestamp` at `now`, as the single largest whole unit.
///
/// Timestamps in the future clamp to `"just now"`.
pub fn format_relative_age(
  timestamp: DateTime<Utc>,
  now: DateTime<Utc>
) -> String {
  let elapsed = (now - timestamp)
    .num_seconds()
    .max(0);

  let buckets = [
    (WEEK, "w"),
    (DAY, "d"),
    (HOUR, "h"),
    (MINUTE, "m")
  ];
  for (unit, suffix) in buckets {
    let count = elapsed / unit;
    if count >= 1 {
      return format!("{count}{suffix} ago");
    }
  }
  "just now".to_string()
}

#[cfg(test)]
mod tests {
  use chrono::{
    Duration,
    TimeZone
  };

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(2026, 10, 17, 9, 30, 0)
      .single()
      .expect("valid timestamp")
  }

  fn age(elapsed: Duration) -> String {
    format_relative_age(now() - elapsed, now())
  }

  #[test]
  fn picks_largest_unit() {
    assert_eq!(
      age(Duration::seconds(90)),
      "1m ago"
    );
    assert_eq!(
      age(Duration::hours(25)),
      "1d ago"
    );
    assert_eq!(
      age(Duration::days(15)),
      "2w ago"
    );
    assert_eq!(
      age(Duration::minutes(59)),
      "59m ago"
    );
    assert_eq!(
      age(Duration::hours(3)),
      "3h ago"
    );
  }

  #[test]
  fn under_a_minute_is_just_now() {
    assert_eq!(
      age(Duration::seconds(0)),
      "just now"
    );
    assert_eq!(
      age(Duration::seconds(59)),
      "just now"
    );
  }

  #[test]
  fn future_timestamps_clamp_to_zero() {
    assert_eq!(
      age(Duration::hours(-5)),
      "just now"
    );
  }
}
