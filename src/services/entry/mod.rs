mod repository;
mod service;
mod validation;

pub use repository::EntryRepository;
pub use service::EntryService;
pub use validation::{can_submit, validate_draft, EntryValidationError};
