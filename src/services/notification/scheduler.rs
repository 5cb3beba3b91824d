//! Pending notification table and the worker thread that fires it.
//!
//! The table maps each entry to at most one pending notification. Scheduling
//! always removes the old value before inserting the new one, and a delivered
//! notification leaves the table before it is shown, so it fires once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use super::{Delivery, Notifier, PendingNotification};
use crate::models::entry::CountdownEntryId;
use crate::services::clock::Clock;

/// Upper bound on a single sleep so wall-clock jumps (suspend, manual time
/// changes) are noticed within a minute.
const MAX_IDLE_WAIT: StdDuration = StdDuration::from_secs(60);

type PendingTable = HashMap<CountdownEntryId, PendingNotification>;

struct Shared {
    pending: Mutex<PendingTable>,
    wake: Condvar,
    shutdown: AtomicBool,
}

impl Shared {
    fn lock_pending(&self) -> MutexGuard<'_, PendingTable> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct NotificationScheduler {
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Default for NotificationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                pending: Mutex::new(HashMap::new()),
                wake: Condvar::new(),
                shutdown: AtomicBool::new(false),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Registers a notification, replacing any pending one for the same entry.
    /// Returns the replaced notification.
    pub fn schedule(&self, notification: PendingNotification) -> Option<PendingNotification> {
        let replaced = {
            let mut pending = self.shared.lock_pending();
            let replaced = pending.remove(&notification.entry_id);
            log::debug!(
                "Scheduling notification for entry {} at {}",
                notification.entry_id,
                notification.fire_at
            );
            pending.insert(notification.entry_id, notification);
            replaced
        };
        self.shared.wake.notify_all();
        replaced
    }

    /// Drops the pending notification for an entry. Cancelling something that
    /// was never scheduled is a no-op.
    pub fn cancel(&self, entry_id: CountdownEntryId) -> Option<PendingNotification> {
        let removed = self.shared.lock_pending().remove(&entry_id);
        if removed.is_some() {
            log::debug!("Cancelled notification for entry {}", entry_id);
            self.shared.wake.notify_all();
        }
        removed
    }

    pub fn pending_for(&self, entry_id: CountdownEntryId) -> Option<PendingNotification> {
        self.shared.lock_pending().get(&entry_id).cloned()
    }

    pub fn pending_count(&self) -> usize {
        self.shared.lock_pending().len()
    }

    /// Removes and returns every notification due at `now`, earliest first.
    pub fn take_due(&self, now: DateTime<Local>) -> Vec<PendingNotification> {
        drain_due(&mut self.shared.lock_pending(), now)
    }

    /// Fires everything due at `now` through `notifier`. Returns how many
    /// notifications were actually shown; skipped and failed ones are still
    /// consumed.
    pub fn deliver_due(&self, now: DateTime<Local>, notifier: &dyn Notifier) -> usize {
        self.take_due(now)
            .iter()
            .filter(|notification| deliver(notifier, notification) == Some(Delivery::Shown))
            .count()
    }

    /// Starts the background worker. Calling it again while running is a no-op.
    pub fn start(&self, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Result<()> {
        let mut worker = self.worker.lock().unwrap_or_else(|e| e.into_inner());
        if worker.is_some() {
            return Ok(());
        }

        self.shared.shutdown.store(false, Ordering::SeqCst);
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("notification-scheduler".to_string())
            .spawn(move || run_worker(shared, notifier, clock))
            .context("Failed to spawn notification scheduler thread")?;

        *worker = Some(handle);
        log::info!("Notification scheduler started");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Stops the worker and waits for it to exit. Pending notifications stay
    /// in the table.
    pub fn shutdown(&self) {
        let handle = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        let Some(handle) = handle else {
            return;
        };

        {
            // Hold the table lock so the worker can't miss the wakeup
            let _pending = self.shared.lock_pending();
            self.shared.shutdown.store(true, Ordering::SeqCst);
        }
        self.shared.wake.notify_all();

        if handle.join().is_err() {
            log::error!("Notification scheduler thread panicked");
        } else {
            log::info!("Notification scheduler stopped");
        }
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(shared: Arc<Shared>, notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) {
    let mut pending = shared.lock_pending();

    loop {
        if shared.shutdown.load(Ordering::SeqCst) {
            break;
        }

        let now = clock.now();
        let due = drain_due(&mut pending, now);
        if !due.is_empty() {
            drop(pending);
            for notification in &due {
                deliver(notifier.as_ref(), notification);
            }
            pending = shared.lock_pending();
            continue;
        }

        let wait = next_wait(&pending, now);
        let (guard, _) = shared
            .wake
            .wait_timeout(pending, wait)
            .unwrap_or_else(|e| e.into_inner());
        pending = guard;
    }
}

fn drain_due(pending: &mut PendingTable, now: DateTime<Local>) -> Vec<PendingNotification> {
    let due_ids: Vec<CountdownEntryId> = pending
        .values()
        .filter(|n| n.is_due(now))
        .map(|n| n.entry_id)
        .collect();

    let mut due: Vec<PendingNotification> = due_ids
        .into_iter()
        .filter_map(|id| pending.remove(&id))
        .collect();
    due.sort_by_key(|n| n.fire_at);
    due
}

fn next_wait(pending: &PendingTable, now: DateTime<Local>) -> StdDuration {
    pending
        .values()
        .map(|n| n.fire_at)
        .min()
        .and_then(|earliest| earliest.signed_duration_since(now).to_std().ok())
        .map(|wait| wait.min(MAX_IDLE_WAIT))
        .unwrap_or(MAX_IDLE_WAIT)
}

/// The notifier logs its own skips.
fn deliver(notifier: &dyn Notifier, notification: &PendingNotification) -> Option<Delivery> {
    match notifier.deliver(notification) {
        Ok(outcome) => {
            if outcome == Delivery::Shown {
                log::info!(
                    "Delivered ready notification for entry {}",
                    notification.entry_id
                );
            }
            Some(outcome)
        }
        Err(err) => {
            log::error!(
                "Failed to deliver notification for entry {}: {:#}",
                notification.entry_id,
                err
            );
            None
        }
    }
}
