//! Confirmation dialog for destructive actions.
//!
//! Shows a modal asking the user to confirm before an entry is deleted.

use egui::{Context, RichText};

use super::EverySoApp;
use crate::models::entry::CountdownEntryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Delete a countdown entry by ID
    DeleteEntry { id: CountdownEntryId, title: String },
    /// Forget the stored display name
    SignOut,
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteEntry { .. } => "Delete Countdown",
            ConfirmAction::SignOut => "Sign Out",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ConfirmAction::DeleteEntry { title, .. } => {
                format!(
                    "Are you sure you want to delete \"{}\"?\n\nThis action cannot be undone.",
                    title
                )
            }
            ConfirmAction::SignOut => "Sign out and forget your display name?".to_string(),
        }
    }

    pub fn confirm_text(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteEntry { .. } => "Delete",
            ConfirmAction::SignOut => "Sign Out",
        }
    }

    /// Destructive actions get a red confirm button
    pub fn is_destructive(&self) -> bool {
        matches!(self, ConfirmAction::DeleteEntry { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Cancelled,
    /// Dialog is still open (or nothing is pending)
    Pending,
}

#[derive(Debug, Default)]
pub struct ConfirmDialogState {
    pending_action: Option<ConfirmAction>,
}

impl ConfirmDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, action: ConfirmAction) {
        self.pending_action = Some(action);
    }

    /// Render the confirmation dialog and return the result.
    ///
    /// A confirmed action stays pending so the caller can take it.
    pub fn render(&mut self, ctx: &Context) -> ConfirmResult {
        let Some(action) = &self.pending_action else {
            return ConfirmResult::Pending;
        };

        let mut result = ConfirmResult::Pending;

        egui::Window::new(action.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(300.0);
                ui.set_max_width(400.0);

                ui.add_space(10.0);

                if action.is_destructive() {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("⚠")
                                .size(24.0)
                                .color(egui::Color32::from_rgb(220, 150, 50)),
                        );
                        ui.vertical(|ui| {
                            ui.label(action.message());
                        });
                    });
                } else {
                    ui.label(action.message());
                }

                ui.add_space(15.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let confirm_button = if action.is_destructive() {
                            egui::Button::new(
                                RichText::new(action.confirm_text()).color(egui::Color32::WHITE),
                            )
                            .fill(egui::Color32::from_rgb(180, 60, 60))
                        } else {
                            egui::Button::new(action.confirm_text())
                        };

                        if ui.add(confirm_button).clicked() {
                            result = ConfirmResult::Confirmed;
                        }

                        ui.add_space(10.0);

                        if ui.button("Cancel").clicked() {
                            result = ConfirmResult::Cancelled;
                        }
                    });
                });

                ui.add_space(5.0);
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            result = ConfirmResult::Cancelled;
        }

        if result == ConfirmResult::Cancelled {
            self.pending_action = None;
        }

        result
    }

    pub fn take_action(&mut self) -> Option<ConfirmAction> {
        self.pending_action.take()
    }
}

impl EverySoApp {
    /// Handle the confirmation dialog rendering and process confirmed actions
    pub(super) fn handle_confirm_dialog(&mut self, ctx: &Context) {
        if self.confirm_dialog.render(ctx) != ConfirmResult::Confirmed {
            return;
        }

        if let Some(action) = self.confirm_dialog.take_action() {
            self.execute_confirmed_action(action);
        }
    }

    fn execute_confirmed_action(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteEntry { id, title } => self.delete_entry(id, &title),
            ConfirmAction::SignOut => self.sign_out(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_message_names_entry() {
        let action = ConfirmAction::DeleteEntry {
            id: CountdownEntryId::new(),
            title: "Beer Time".to_string(),
        };
        assert!(action.message().contains("\"Beer Time\""));
        assert!(action.is_destructive());
        assert_eq!(action.confirm_text(), "Delete");
    }

    #[test]
    fn take_action_clears_pending() {
        let mut state = ConfirmDialogState::new();
        assert_eq!(state.take_action(), None);

        state.request(ConfirmAction::SignOut);
        assert_eq!(state.take_action(), Some(ConfirmAction::SignOut));
        assert_eq!(state.take_action(), None);
    }
}
