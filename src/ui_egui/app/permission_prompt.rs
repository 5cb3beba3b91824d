use egui::RichText;

use super::EverySoApp;
use crate::services::permission::{PROMPT_MESSAGE, PROMPT_TITLE};

impl EverySoApp {
    pub(super) fn render_permission_prompt(&mut self, ctx: &egui::Context) {
        if !self.state.show_permission_prompt {
            return;
        }

        let mut decision = None;

        egui::Window::new(PROMPT_TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_max_width(340.0);
                ui.add_space(6.0);
                ui.label(PROMPT_MESSAGE);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(RichText::new("Allow").strong()).clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Not Now").clicked() {
                        decision = Some(false);
                    }
                });
            });

        if let Some(granted) = decision {
            self.record_permission(granted);
        }
    }

    fn record_permission(&mut self, granted: bool) {
        self.state.show_permission_prompt = false;

        match self.context.permission_service().record_decision(granted) {
            Ok(status) => {
                self.settings.notification_permission = status;
                self.context.notifier().set_enabled(status.is_granted());
                if status.is_granted() {
                    self.toast_manager.success("Notifications enabled");
                }
            }
            Err(err) => {
                log::error!("Failed to store notification permission: {:#}", err);
                self.toast_manager.error("Couldn't save the notification choice");
            }
        }
    }
}
