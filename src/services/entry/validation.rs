use thiserror::Error;

use crate::models::entry::EntryDraft;

/// Reasons the add/edit form refuses to save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryValidationError {
    #[error("A title is required")]
    EmptyTitle,
    #[error("The interval must be longer than zero. Set at least one day, hour or minute.")]
    ZeroDuration,
}

impl EntryValidationError {
    /// Heading for the blocking alert shown by the form.
    pub fn alert_title(&self) -> &'static str {
        match self {
            EntryValidationError::EmptyTitle => "Missing Title",
            EntryValidationError::ZeroDuration => "Invalid Interval",
        }
    }
}

/// Checks a draft before anything is written. Nothing is mutated here.
pub fn validate_draft(draft: &EntryDraft) -> Result<(), EntryValidationError> {
    if draft.title.is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }

    if draft.duration_seconds() <= 0 {
        return Err(EntryValidationError::ZeroDuration);
    }

    Ok(())
}

/// Mirrors the disabled state of the save button.
pub fn can_submit(draft: &EntryDraft) -> bool {
    !draft.title.is_empty()
}
