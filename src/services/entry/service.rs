use rusqlite::Connection;

use super::repository::EntryRepository;
use super::validation::{validate_draft, EntryValidationError};
use crate::models::entry::{CountdownEntry, CountdownEntryId, EntryDraft};
use crate::services::clock::Clock;
use crate::services::notification::{NotificationScheduler, PendingNotification};

/// Create/edit/reset/delete flows for countdown entries.
///
/// Storage failures are logged and otherwise ignored: the caller carries on as
/// if the write succeeded. Validation failures are the only errors returned.
pub struct EntryService<'a> {
    repo: EntryRepository<'a>,
    scheduler: &'a NotificationScheduler,
    clock: &'a dyn Clock,
}

impl<'a> EntryService<'a> {
    pub fn new(
        conn: &'a Connection,
        scheduler: &'a NotificationScheduler,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            repo: EntryRepository::new(conn),
            scheduler,
            clock,
        }
    }

    /// All stored entries. A failed load is logged and reads as empty.
    pub fn list(&self) -> Vec<CountdownEntry> {
        self.repo.list_all().unwrap_or_else(|err| {
            log::error!("Failed to load countdown entries: {:#}", err);
            Vec::new()
        })
    }

    pub fn get(&self, id: CountdownEntryId) -> Option<CountdownEntry> {
        self.repo.get(id).unwrap_or_else(|err| {
            log::error!("Failed to load countdown entry {}: {:#}", id, err);
            None
        })
    }

    /// Saves a new entry from the add form. The countdown starts now.
    pub fn create(&self, draft: &EntryDraft) -> Result<CountdownEntry, EntryValidationError> {
        validate_draft(draft)?;

        let now = self.clock.now();
        let mut entry = CountdownEntry::new(
            draft.title.clone(),
            draft.description.clone(),
            draft.interval(),
            now,
        );
        entry.notify_on_ready = draft.notify_on_ready;
        entry.reset_on_save = draft.reset_on_save;

        if let Err(err) = self.repo.insert(&entry) {
            log::error!("Failed to save new entry '{}': {:#}", entry.title, err);
        } else {
            log::info!("Created entry '{}' ({})", entry.title, entry.id());
        }

        self.reschedule(&entry);
        Ok(entry)
    }

    /// Writes the edit form back onto an existing entry.
    ///
    /// Nothing is touched when validation fails.
    pub fn update(
        &self,
        entry: &mut CountdownEntry,
        draft: &EntryDraft,
    ) -> Result<(), EntryValidationError> {
        validate_draft(draft)?;

        entry.apply_draft(draft);
        if draft.reset_on_save {
            entry.reset(self.clock.now());
        }

        match self.repo.update(entry) {
            Ok(true) => log::info!("Updated entry '{}' ({})", entry.title, entry.id()),
            Ok(false) => log::warn!("Entry {} no longer exists; edit not stored", entry.id()),
            Err(err) => log::error!("Failed to save entry '{}': {:#}", entry.title, err),
        }

        self.reschedule(entry);
        Ok(())
    }

    /// Starts a new cycle for the entry and re-arms its notification.
    pub fn reset(&self, entry: &mut CountdownEntry) {
        self.scheduler.cancel(entry.id());
        entry.reset(self.clock.now());

        if let Err(err) = self.repo.update(entry) {
            log::error!("Failed to save reset of '{}': {:#}", entry.title, err);
        }

        self.schedule_notification(entry);
    }

    /// Removes an entry and anything pending for it.
    pub fn delete(&self, id: CountdownEntryId) {
        self.scheduler.cancel(id);

        match self.repo.delete(id) {
            Ok(true) => log::info!("Deleted entry {}", id),
            Ok(false) => log::warn!("Entry {} was already gone", id),
            Err(err) => log::error!("Failed to delete entry {}: {:#}", id, err),
        }
    }

    /// Registers the ready notification for the entry's current cycle.
    ///
    /// Does nothing when the entry doesn't want notifications or its ready
    /// time is not in the future. Returns whether a notification was
    /// registered.
    pub fn schedule_notification(&self, entry: &CountdownEntry) -> bool {
        if !entry.notify_on_ready {
            return false;
        }

        if entry.next_ready() <= self.clock.now() {
            log::debug!("Entry {} is already ready; nothing to schedule", entry.id());
            return false;
        }

        self.scheduler.schedule(PendingNotification::ready_for(entry));
        true
    }

    /// Cancel-then-schedule so an entry never has a stale or duplicate
    /// notification.
    pub fn reschedule(&self, entry: &CountdownEntry) -> bool {
        self.scheduler.cancel(entry.id());
        self.schedule_notification(entry)
    }

    /// Re-registers notifications for every stored entry. Timers live in
    /// memory, so this runs once at launch.
    pub fn restore_notifications(&self) -> usize {
        let scheduled = self
            .list()
            .iter()
            .filter(|entry| self.reschedule(entry))
            .count();
        log::info!("Restored {} pending notification(s)", scheduled);
        scheduled
    }
}
