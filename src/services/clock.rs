//! Time sources.
//!
//! Progress and scheduling code never calls `Local::now()` directly; it asks a
//! [`Clock`]. The UI drives a [`Ticker`] that republishes the time once per
//! second so rows can recompute their progress.

use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to. Used by tests and by anything that
/// needs deterministic timestamps.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Passive 1 Hz poll. It never mutates entries; it only decides when the
/// published time should change and how long the UI may sleep.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    published: DateTime<Local>,
}

impl Ticker {
    pub const DEFAULT_PERIOD_SECS: i64 = 1;

    pub fn new(now: DateTime<Local>) -> Self {
        Self::with_period(now, Duration::seconds(Self::DEFAULT_PERIOD_SECS))
    }

    pub fn with_period(now: DateTime<Local>, period: Duration) -> Self {
        Self {
            period,
            published: now,
        }
    }

    /// The last published time.
    pub fn now(&self) -> DateTime<Local> {
        self.published
    }

    /// Republishes `now` if a full period has passed (or the clock went
    /// backwards). Returns true when the published time changed.
    pub fn tick(&mut self, now: DateTime<Local>) -> bool {
        let since = now.signed_duration_since(self.published);
        if since >= self.period || since < Duration::zero() {
            self.published = now;
            true
        } else {
            false
        }
    }

    /// How long until the next tick is due, for `request_repaint_after`.
    pub fn until_next_tick(&self, now: DateTime<Local>) -> StdDuration {
        let due = self.published + self.period;
        due.signed_duration_since(now)
            .to_std()
            .unwrap_or(StdDuration::ZERO)
    }
}
