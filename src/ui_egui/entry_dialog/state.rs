use crate::models::entry::{CountdownEntry, CountdownEntryId, EntryDraft};
use crate::services::entry::{can_submit, EntryValidationError};

/// State for the add/edit dialog
#[derive(Debug, Clone, Default)]
pub struct EntryDialogState {
    /// Entry being edited (None for a new entry)
    pub entry_id: Option<CountdownEntryId>,
    pub draft: EntryDraft,
    /// Blocking alert raised by a rejected save
    pub alert: Option<EntryValidationError>,
}

impl EntryDialogState {
    /// Empty form: zero interval, both toggles off.
    pub fn new_entry() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing entry, interval components included.
    pub fn from_entry(entry: &CountdownEntry) -> Self {
        Self {
            entry_id: Some(entry.id()),
            draft: EntryDraft::from_entry(entry),
            alert: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.entry_id.is_some()
    }

    pub fn window_title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Countdown"
        } else {
            "New Countdown"
        }
    }

    pub fn can_save(&self) -> bool {
        can_submit(&self.draft)
    }

    pub fn show_alert(&mut self, error: EntryValidationError) {
        self.alert = Some(error);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
