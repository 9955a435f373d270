use chrono::{DateTime, Utc};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Wall-clock time as milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// `true` when more than `days` days separate `since` from `now`.
///
/// A `since` in the future is never older.
#[must_use]
pub const fn older_than_days(since: i64, now: i64, days: i64) -> bool {
    now.saturating_sub(since) > days.saturating_mul(MILLIS_PER_DAY)
}

/// RFC 3339 rendering of an epoch-millisecond timestamp, for humans.
#[must_use]
pub fn format_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map_or_else(|| millis.to_string(), |at| at.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_days_boundary() {
        let start = 1_700_000_000_000;
        assert!(!older_than_days(start, start + 30 * MILLIS_PER_DAY, 30));
        assert!(older_than_days(start, start + 30 * MILLIS_PER_DAY + 1, 30));
        assert!(!older_than_days(start + MILLIS_PER_DAY, start, 30));
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn formats_epoch() {
        assert_eq!(format_millis(0), "1970-01-01T00:00:00+00:00");
    }
}
