//! Interval and progress arithmetic for countdown entries.
//!
//! Everything here is a pure function of its arguments. Callers pass the
//! current time explicitly so the UI ticker and the tests share one code path.

use chrono::{DateTime, Duration, Local};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Stand-in ready time for durations past the calendar's range (about 2700 years).
const FAR_FUTURE_DAYS: i64 = 1_000_000;

/// Total interval length in seconds. Negative components count as zero and
/// the sum saturates instead of overflowing.
pub fn duration_seconds(days: i64, hours: i64, minutes: i64) -> i64 {
    days.max(0)
        .saturating_mul(SECONDS_PER_DAY)
        .saturating_add(hours.max(0).saturating_mul(SECONDS_PER_HOUR))
        .saturating_add(minutes.max(0).saturating_mul(SECONDS_PER_MINUTE))
}

/// Moment the countdown started at `last_reset` becomes ready.
///
/// Durations that leave the representable date range saturate to a time far
/// in the future.
pub fn next_ready(last_reset: DateTime<Local>, duration_seconds: i64) -> DateTime<Local> {
    Duration::try_seconds(duration_seconds)
        .and_then(|delta| last_reset.checked_add_signed(delta))
        .or_else(|| last_reset.checked_add_signed(Duration::days(FAR_FUTURE_DAYS)))
        .unwrap_or(last_reset)
}

/// Elapsed fraction of the interval, clamped to `[0, 1]`.
///
/// A non-positive duration is already complete.
pub fn progress(now: DateTime<Local>, last_reset: DateTime<Local>, duration_seconds: i64) -> f64 {
    if duration_seconds <= 0 {
        return 1.0;
    }

    let elapsed_ms = now.signed_duration_since(last_reset).num_milliseconds() as f64;
    let total_ms = duration_seconds as f64 * 1_000.0;
    (elapsed_ms / total_ms).clamp(0.0, 1.0)
}

/// Whole seconds until ready, never negative.
pub fn remaining(now: DateTime<Local>, last_reset: DateTime<Local>, duration_seconds: i64) -> i64 {
    next_ready(last_reset, duration_seconds)
        .signed_duration_since(now)
        .num_seconds()
        .max(0)
}

/// Human readable countdown text.
///
/// * under a minute: `"42s left"`
/// * under an hour: `"5m 3s left"`
/// * otherwise: `"2d 4h 10m left"`, dropping leading zero components but
///   always keeping minutes
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);

    if seconds < SECONDS_PER_MINUTE {
        return format!("{}s left", seconds);
    }

    if seconds < SECONDS_PER_HOUR {
        let minutes = seconds / SECONDS_PER_MINUTE;
        let secs = seconds % SECONDS_PER_MINUTE;
        return format!("{}m {}s left", minutes, secs);
    }

    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{}h", hours));
    }
    parts.push(format!("{}m", minutes));

    format!("{} left", parts.join(" "))
}

/// Progress as a whole percentage for labels (truncated, like the bar fill).
pub fn progress_percent(progress: f64) -> u8 {
    (progress.clamp(0.0, 1.0) * 100.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn base() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn duration_sums_components() {
        assert_eq!(duration_seconds(1, 1, 1), 90_061);
        assert_eq!(duration_seconds(0, 0, 0), 0);
        assert_eq!(duration_seconds(30, 0, 0), 30 * 24 * 60 * 60);
    }

    #[test]
    fn duration_clamps_negative_components() {
        assert_eq!(duration_seconds(-3, 2, -10), 7_200);
    }

    #[test]
    fn duration_saturates_on_huge_components() {
        assert_eq!(duration_seconds(i64::MAX / 1_000, 0, 0), i64::MAX);
        assert_eq!(duration_seconds(i64::MAX, i64::MAX, i64::MAX), i64::MAX);
    }

    #[test]
    fn huge_durations_stay_far_in_the_future() {
        let far = base() + Duration::days(FAR_FUTURE_DAYS);
        assert_eq!(next_ready(base(), i64::MAX), far);
        assert_eq!(next_ready(base(), 100_000_000 * SECONDS_PER_DAY), far);

        assert!(progress(base() + Duration::days(1), base(), i64::MAX) < 1e-9);
        assert!(remaining(base(), base(), i64::MAX) > 0);
        assert!(format_remaining(remaining(base(), base(), i64::MAX)).ends_with(" left"));
    }

    #[test]
    fn next_ready_adds_duration() {
        let ready = next_ready(base(), 3_600);
        assert_eq!(ready, base() + Duration::hours(1));
    }

    #[test]
    fn progress_is_zero_at_reset_and_one_when_ready() {
        assert_eq!(progress(base(), base(), 600), 0.0);
        assert_eq!(progress(base() + Duration::seconds(600), base(), 600), 1.0);
        assert_eq!(progress(base() + Duration::days(3), base(), 600), 1.0);
    }

    #[test]
    fn progress_is_halfway_at_midpoint() {
        let half = progress(base() + Duration::seconds(300), base(), 600);
        assert!((half - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_before_reset_clamps_to_zero() {
        assert_eq!(progress(base() - Duration::minutes(5), base(), 600), 0.0);
    }

    #[test]
    fn zero_duration_counts_as_complete() {
        assert_eq!(progress(base(), base(), 0), 1.0);
        assert_eq!(progress(base(), base(), -5), 1.0);
    }

    #[test]
    fn remaining_floors_at_zero() {
        assert_eq!(remaining(base(), base(), 120), 120);
        assert_eq!(remaining(base() + Duration::seconds(45), base(), 120), 75);
        assert_eq!(remaining(base() + Duration::hours(2), base(), 120), 0);
    }

    #[test_case(0, "0s left"; "zero")]
    #[test_case(59, "59s left"; "just under a minute")]
    #[test_case(60, "1m 0s left"; "exactly a minute")]
    #[test_case(61, "1m 1s left"; "minute and a second")]
    #[test_case(3_599, "59m 59s left"; "just under an hour")]
    #[test_case(3_600, "1h 0m left"; "exactly an hour")]
    #[test_case(7_260, "2h 1m left"; "hours and minutes")]
    #[test_case(86_400, "1d 0h 0m left"; "exactly a day")]
    #[test_case(90_061, "1d 1h 1m left"; "all components")]
    #[test_case(172_860, "2d 0h 1m left"; "zero hours between days and minutes")]
    fn format_remaining_tiers(seconds: i64, expected: &str) {
        assert_eq!(format_remaining(seconds), expected);
    }

    #[test]
    fn format_remaining_treats_negative_as_zero() {
        assert_eq!(format_remaining(-30), "0s left");
    }

    #[test]
    fn format_remaining_is_stable_across_calls() {
        let first = format_remaining(4_000);
        let _ = format_remaining(12);
        assert_eq!(format_remaining(4_000), first);
    }

    #[test]
    fn progress_percent_truncates() {
        assert_eq!(progress_percent(0.0), 0);
        assert_eq!(progress_percent(0.999), 99);
        assert_eq!(progress_percent(1.0), 100);
        assert_eq!(progress_percent(1.7), 100);
    }
}
