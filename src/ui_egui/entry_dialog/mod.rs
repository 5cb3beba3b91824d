mod render;
mod state;

pub use render::{render_entry_dialog, EntryDialogAction};
pub use state::EntryDialogState;
