// Countdown entry model
// One user-defined recurring countdown and the form buffer used to edit it

use std::fmt;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::services::countdown;

/// Largest values the add/edit form accepts for each interval component.
pub const MAX_INTERVAL_DAYS: u32 = 365;
pub const MAX_INTERVAL_HOURS: u32 = 23;
pub const MAX_INTERVAL_MINUTES: u32 = 59;

/// Identifier assigned once when an entry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountdownEntryId(Uuid);

impl CountdownEntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the hyphenated form stored in the database.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl Default for CountdownEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CountdownEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Configured span between a reset and readiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl Interval {
    pub const fn new(days: u32, hours: u32, minutes: u32) -> Self {
        Self {
            days,
            hours,
            minutes,
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        countdown::duration_seconds(self.days as i64, self.hours as i64, self.minutes as i64)
    }
}

/// A recurring countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownEntry {
    id: CountdownEntryId,
    pub title: String,
    pub details: String,
    pub last_reset: DateTime<Local>,
    pub interval: Interval,
    pub notify_on_ready: bool,
    pub reset_on_save: bool,
}

impl CountdownEntry {
    /// Creates a new entry whose countdown starts at `now`.
    ///
    /// # Examples
    /// ```
    /// use everyso::models::entry::{CountdownEntry, Interval};
    /// use chrono::Local;
    ///
    /// let now = Local::now();
    /// let entry = CountdownEntry::new("Water plants", "", Interval::new(3, 0, 0), now);
    /// assert_eq!(entry.progress(now), 0.0);
    /// ```
    pub fn new(
        title: impl Into<String>,
        details: impl Into<String>,
        interval: Interval,
        now: DateTime<Local>,
    ) -> Self {
        Self {
            id: CountdownEntryId::new(),
            title: title.into(),
            details: details.into(),
            last_reset: now,
            interval,
            notify_on_ready: false,
            reset_on_save: false,
        }
    }

    /// Rebuilds an entry loaded from storage, keeping its identifier.
    pub fn restore(
        id: CountdownEntryId,
        title: String,
        details: String,
        last_reset: DateTime<Local>,
        interval: Interval,
        notify_on_ready: bool,
        reset_on_save: bool,
    ) -> Self {
        Self {
            id,
            title,
            details,
            last_reset,
            interval,
            notify_on_ready,
            reset_on_save,
        }
    }

    pub fn id(&self) -> CountdownEntryId {
        self.id
    }

    pub fn duration_seconds(&self) -> i64 {
        self.interval.duration_seconds()
    }

    pub fn next_ready(&self) -> DateTime<Local> {
        countdown::next_ready(self.last_reset, self.duration_seconds())
    }

    pub fn progress(&self, now: DateTime<Local>) -> f64 {
        countdown::progress(now, self.last_reset, self.duration_seconds())
    }

    pub fn remaining(&self, now: DateTime<Local>) -> i64 {
        countdown::remaining(now, self.last_reset, self.duration_seconds())
    }

    pub fn formatted_remaining(&self, now: DateTime<Local>) -> String {
        countdown::format_remaining(self.remaining(now))
    }

    pub fn is_ready(&self, now: DateTime<Local>) -> bool {
        self.progress(now) >= 1.0
    }

    /// Starts a new cycle. Last-reset never moves backwards.
    pub fn reset(&mut self, now: DateTime<Local>) {
        if now > self.last_reset {
            self.last_reset = now;
        }
    }

    /// Copies the editable fields from a draft. The identifier and last-reset
    /// are left alone.
    pub fn apply_draft(&mut self, draft: &EntryDraft) {
        self.title = draft.title.clone();
        self.details = draft.description.clone();
        self.interval = draft.interval();
        self.notify_on_ready = draft.notify_on_ready;
        self.reset_on_save = draft.reset_on_save;
    }
}

/// Editable buffer behind the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub description: String,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub notify_on_ready: bool,
    pub reset_on_save: bool,
}

impl EntryDraft {
    pub fn from_entry(entry: &CountdownEntry) -> Self {
        Self {
            title: entry.title.clone(),
            description: entry.details.clone(),
            days: entry.interval.days,
            hours: entry.interval.hours,
            minutes: entry.interval.minutes,
            notify_on_ready: entry.notify_on_ready,
            reset_on_save: entry.reset_on_save,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.days, self.hours, self.minutes)
    }

    pub fn duration_seconds(&self) -> i64 {
        self.interval().duration_seconds()
    }

    /// Keeps the components inside the ranges the form offers.
    pub fn clamp_components(&mut self) {
        self.days = self.days.min(MAX_INTERVAL_DAYS);
        self.hours = self.hours.min(MAX_INTERVAL_HOURS);
        self.minutes = self.minutes.min(MAX_INTERVAL_MINUTES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn base() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 5, 28, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_entry_starts_counting_now() {
        let entry = CountdownEntry::new("Beer Time", "Monthly reward", Interval::new(30, 0, 0), base());
        assert_eq!(entry.title, "Beer Time");
        assert_eq!(entry.details, "Monthly reward");
        assert_eq!(entry.duration_seconds(), 30 * 24 * 60 * 60);
        assert_eq!(entry.last_reset, base());
        assert_eq!(entry.remaining(base()), entry.duration_seconds());
        assert!(!entry.notify_on_ready);
        assert!(!entry.reset_on_save);
    }

    #[test]
    fn identifiers_are_unique() {
        let a = CountdownEntry::new("a", "", Interval::new(0, 1, 0), base());
        let b = CountdownEntry::new("a", "", Interval::new(0, 1, 0), base());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn identifier_round_trips_through_text() {
        let id = CountdownEntryId::new();
        let parsed = CountdownEntryId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
        assert!(CountdownEntryId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn reset_moves_last_reset_forward_only() {
        let mut entry = CountdownEntry::new("Stretch", "", Interval::new(0, 1, 0), base());
        let later = base() + Duration::minutes(90);

        entry.reset(later);
        assert_eq!(entry.last_reset, later);
        assert_eq!(entry.remaining(later), 3_600);

        entry.reset(base());
        assert_eq!(entry.last_reset, later, "reset must not rewind the cycle");
    }

    #[test]
    fn ready_once_interval_elapsed() {
        let entry = CountdownEntry::new("Stretch", "", Interval::new(0, 0, 10), base());
        assert!(!entry.is_ready(base() + Duration::minutes(9)));
        assert!(entry.is_ready(base() + Duration::minutes(10)));
        assert_eq!(entry.formatted_remaining(base() + Duration::minutes(9)), "1m 0s left");
    }

    #[test]
    fn draft_round_trips_entry_fields() {
        let mut entry = CountdownEntry::new("Oil change", "car", Interval::new(90, 2, 15), base());
        entry.notify_on_ready = true;

        let draft = EntryDraft::from_entry(&entry);
        assert_eq!(draft.days, 90);
        assert_eq!(draft.hours, 2);
        assert_eq!(draft.minutes, 15);
        assert!(draft.notify_on_ready);

        let mut copy = entry.clone();
        copy.apply_draft(&draft);
        assert_eq!(copy, entry);
    }

    #[test]
    fn apply_draft_keeps_identity_and_reset_time() {
        let mut entry = CountdownEntry::new("Old", "", Interval::new(1, 0, 0), base());
        let id = entry.id();
        let draft = EntryDraft {
            title: "New".to_string(),
            description: "details".to_string(),
            days: 0,
            hours: 5,
            minutes: 0,
            notify_on_ready: true,
            reset_on_save: true,
        };

        entry.apply_draft(&draft);
        assert_eq!(entry.id(), id);
        assert_eq!(entry.last_reset, base());
        assert_eq!(entry.title, "New");
        assert_eq!(entry.interval, Interval::new(0, 5, 0));
        assert!(entry.reset_on_save);
    }

    #[test]
    fn clamp_components_limits_form_ranges() {
        let mut draft = EntryDraft {
            days: 1_000,
            hours: 30,
            minutes: 75,
            ..Default::default()
        };
        draft.clamp_components();
        assert_eq!(draft.interval(), Interval::new(365, 23, 59));
    }
}
