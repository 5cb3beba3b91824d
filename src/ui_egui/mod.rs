mod app;
mod entry_dialog;
pub mod theme;

pub use app::EverySoApp;
