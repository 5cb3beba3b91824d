// Property-based tests for the interval and progress calculator

use chrono::{DateTime, Duration, Local, TimeZone};
use everyso::models::entry::{CountdownEntry, Interval};
use everyso::services::countdown::{
    duration_seconds, format_remaining, next_ready, progress, remaining,
};
use proptest::prelude::*;

fn base() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
}

proptest! {
    /// Property: duration is the weighted sum of its components
    #[test]
    fn prop_duration_formula(
        days in 0..=365i64,
        hours in 0..=23i64,
        minutes in 0..=59i64,
    ) {
        prop_assert_eq!(
            duration_seconds(days, hours, minutes),
            days * 86_400 + hours * 3_600 + minutes * 60
        );
    }

    /// Property: negative components never make the duration negative
    #[test]
    fn prop_duration_never_negative(
        days in -1000..1000i64,
        hours in -1000..1000i64,
        minutes in -1000..1000i64,
    ) {
        prop_assert!(duration_seconds(days, hours, minutes) >= 0);
    }

    /// Property: a countdown starts at zero progress
    #[test]
    fn prop_progress_zero_at_reset(secs in 1..10_000_000i64) {
        prop_assert_eq!(progress(base(), base(), secs), 0.0);
    }

    /// Property: once the ready time passes, progress stays complete
    #[test]
    fn prop_progress_complete_once_ready(
        secs in 1..10_000_000i64,
        extra in 0..10_000_000i64,
    ) {
        let now = next_ready(base(), secs) + Duration::seconds(extra);
        prop_assert_eq!(progress(now, base(), secs), 1.0);
        prop_assert_eq!(remaining(now, base(), secs), 0);
    }

    /// Property: progress never decreases as time moves forward
    #[test]
    fn prop_progress_monotonic(
        secs in 1..10_000_000i64,
        a in -1_000_000..20_000_000i64,
        b in -1_000_000..20_000_000i64,
    ) {
        let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
        let p1 = progress(base() + Duration::seconds(earlier), base(), secs);
        let p2 = progress(base() + Duration::seconds(later), base(), secs);
        prop_assert!((0.0..=1.0).contains(&p1));
        prop_assert!(p1 <= p2);
    }

    /// Property: right after a reset the full interval remains
    #[test]
    fn prop_remaining_is_duration_after_reset(
        days in 0..=365u32,
        hours in 0..=23u32,
        minutes in 1..=59u32,
    ) {
        let mut entry = CountdownEntry::new("Prop", "", Interval::new(days, hours, minutes), base());
        let later = base() + Duration::days(400);
        entry.reset(later);
        prop_assert_eq!(entry.remaining(later), entry.duration_seconds());
        prop_assert_eq!(entry.progress(later), 0.0);
    }

    /// Property: reset never moves the start of the cycle backwards
    #[test]
    fn prop_reset_is_forward_only(back in 1..10_000_000i64) {
        let mut entry = CountdownEntry::new("Prop", "", Interval::new(1, 0, 0), base());
        entry.reset(base() - Duration::seconds(back));
        prop_assert_eq!(entry.last_reset, base());
    }

    /// Property: formatted text always ends with "left"
    #[test]
    fn prop_format_ends_with_left(secs in -100..100_000_000i64) {
        prop_assert!(format_remaining(secs).ends_with(" left"));
    }
}

/// The smallest interval the form offers becomes ready exactly one minute later.
#[test]
fn one_minute_entry_is_ready_after_one_minute() {
    let entry = CountdownEntry::new("Blink", "", Interval::new(0, 0, 1), base());
    assert!(!entry.is_ready(base() + Duration::seconds(59)));
    assert!(entry.is_ready(base() + Duration::minutes(1)));
}

/// A one second duration is complete after a single tick.
#[test]
fn one_second_duration_completes_after_one_tick() {
    assert_eq!(progress(base(), base(), 1), 0.0);
    assert_eq!(progress(base() + Duration::seconds(1), base(), 1), 1.0);
}
