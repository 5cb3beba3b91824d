//! One-shot "ready" notifications for countdown entries.
//!
//! [`NotificationScheduler`] owns the pending timers; a [`Notifier`] puts the
//! message on screen once a timer fires.

mod scheduler;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use chrono::{DateTime, Local};
use notify_rust::{Notification, Timeout};

use crate::models::entry::{CountdownEntry, CountdownEntryId};

pub use scheduler::NotificationScheduler;

pub const READY_BODY: &str = "Time to do it again. Reset the countdown when you're done.";

/// A registered notification waiting for its trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    pub entry_id: CountdownEntryId,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Local>,
}

impl PendingNotification {
    /// Builds the ready notification for an entry's current cycle.
    pub fn ready_for(entry: &CountdownEntry) -> Self {
        Self {
            entry_id: entry.id(),
            title: format!("{} is ready", entry.title),
            body: READY_BODY.to_string(),
            fire_at: entry.next_ready(),
        }
    }

    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        self.fire_at <= now
    }
}

/// What happened to a notification handed to a [`Notifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Shown,
    /// Not shown because the user has not allowed notifications.
    Skipped,
}

/// Something that can show a notification to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn deliver(&self, notification: &PendingNotification) -> Result<Delivery>;
}

/// Desktop notifications through the platform notification daemon.
pub struct DesktopNotifier {
    enabled: AtomicBool,
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            app_name: app_name.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Follows the user's permission decision.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl Notifier for DesktopNotifier {
    fn deliver(&self, notification: &PendingNotification) -> Result<Delivery> {
        if !self.is_enabled() {
            log::info!(
                "Notifications not permitted, skipping '{}' for entry {}",
                notification.title,
                notification.entry_id
            );
            return Ok(Delivery::Skipped);
        }

        Notification::new()
            .appname(&self.app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .timeout(Timeout::Milliseconds(10000))
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(Delivery::Shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entry::Interval;
    use chrono::{Duration, TimeZone};

    #[test]
    fn ready_notification_targets_next_ready() {
        let reset = Local.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap();
        let entry = CountdownEntry::new("Walk the dog", "", Interval::new(0, 2, 30), reset);

        let pending = PendingNotification::ready_for(&entry);
        assert_eq!(pending.entry_id, entry.id());
        assert_eq!(pending.title, "Walk the dog is ready");
        assert_eq!(pending.body, READY_BODY);
        assert_eq!(pending.fire_at, reset + Duration::minutes(150));
        assert!(!pending.is_due(reset));
        assert!(pending.is_due(reset + Duration::minutes(150)));
    }

    #[test]
    fn disabled_desktop_notifier_reports_skip() {
        let notifier = DesktopNotifier::new("EverySo");
        assert!(!notifier.is_enabled());

        let reset = Local.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap();
        let entry = CountdownEntry::new("Quiet", "", Interval::new(0, 0, 1), reset);
        assert_eq!(
            notifier.deliver(&PendingNotification::ready_for(&entry)).unwrap(),
            Delivery::Skipped
        );
    }
}
