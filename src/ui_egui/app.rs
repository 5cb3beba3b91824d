mod confirm;
mod context;
mod lifecycle;
mod list;
mod permission_prompt;
mod sidebar;
mod state;
mod toast;

use self::confirm::ConfirmDialogState;
use self::context::AppContext;
use self::state::AppState;
use self::toast::ToastManager;
use crate::models::entry::{CountdownEntry, CountdownEntryId};
use crate::models::settings::Settings;
use crate::services::clock::Ticker;
use crate::ui_egui::entry_dialog::{render_entry_dialog, EntryDialogAction, EntryDialogState};
use crate::ui_egui::theme::AppTheme;

pub struct EverySoApp {
    /// Shared access to the leaked database and supporting services
    context: AppContext,
    /// Persisted UI settings
    settings: Settings,
    /// Entries in display order, loaded once at startup
    entries: Vec<CountdownEntry>,
    /// Publishes the current time once per second
    ticker: Ticker,
    /// Desktop preference used while the user hasn't picked a theme
    system_prefers_dark: bool,
    active_theme: AppTheme,
    entry_dialog: Option<EntryDialogState>,
    state: AppState,
    toast_manager: ToastManager,
    confirm_dialog: ConfirmDialogState,
}

impl eframe::App for EverySoApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}

impl EverySoApp {
    fn open_new_entry_dialog(&mut self) {
        self.entry_dialog = Some(EntryDialogState::new_entry());
    }

    fn open_edit_dialog(&mut self, id: CountdownEntryId) {
        if let Some(entry) = self.entries.iter().find(|entry| entry.id() == id) {
            self.entry_dialog = Some(EntryDialogState::from_entry(entry));
        }
    }

    fn render_entry_dialog(&mut self, ctx: &egui::Context) {
        let Some(state) = self.entry_dialog.as_mut() else {
            return;
        };

        match render_entry_dialog(ctx, state) {
            EntryDialogAction::None => {}
            EntryDialogAction::Cancel => self.entry_dialog = None,
            EntryDialogAction::Save => self.save_entry_dialog(),
        }
    }

    /// Validation failures keep the dialog open behind its alert.
    fn save_entry_dialog(&mut self) {
        let Some(state) = self.entry_dialog.as_mut() else {
            return;
        };

        let service = self.context.entry_service();
        let result = match state.entry_id {
            None => service.create(&state.draft).map(|entry| {
                let title = entry.title.clone();
                self.entries.push(entry);
                format!("Added \"{}\"", title)
            }),
            Some(id) => match self.entries.iter_mut().find(|entry| entry.id() == id) {
                Some(entry) => service
                    .update(entry, &state.draft)
                    .map(|()| format!("Saved \"{}\"", entry.title)),
                None => {
                    log::warn!("Edited entry {} is no longer listed", id);
                    self.entry_dialog = None;
                    return;
                }
            },
        };

        match result {
            Ok(message) => {
                self.toast_manager.success(message);
                self.entry_dialog = None;
            }
            Err(err) => {
                log::debug!("Rejected entry form: {}", err);
                state.show_alert(err);
            }
        }
    }

    fn reset_entry(&mut self, id: CountdownEntryId) {
        let service = self.context.entry_service();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id() == id) {
            service.reset(entry);
            self.toast_manager.info(format!("Reset \"{}\"", entry.title));
        }
    }

    fn delete_entry(&mut self, id: CountdownEntryId, title: &str) {
        self.context.entry_service().delete(id);
        self.entries.retain(|entry| entry.id() != id);
        self.toast_manager.success(format!("Deleted \"{}\"", title));
    }

    /// Writes the in-memory settings back. Failures are logged only.
    fn persist_settings(&self) {
        if let Err(err) = self.context.settings_service().update(&self.settings) {
            log::error!("Failed to save settings: {:#}", err);
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let is_dark = self.settings.resolve_dark_mode(self.system_prefers_dark);
        self.active_theme = AppTheme::for_mode(is_dark);
        self.active_theme.apply_to_context(ctx);
    }
}
