//! Sidebar with the greeting, sign-in form and theme toggle.

use egui::RichText;

use super::confirm::ConfirmAction;
use super::EverySoApp;
use crate::models::settings::PermissionStatus;

const SIDEBAR_MIN_WIDTH: f32 = 180.0;
const SIDEBAR_DEFAULT_WIDTH: f32 = 220.0;
const SIDEBAR_MAX_WIDTH: f32 = 320.0;

/// Greeting line for the sidebar header.
pub fn greeting(display_name: Option<&str>) -> String {
    match display_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("Hello, {}!", name),
        None => "Hello!".to_string(),
    }
}

impl EverySoApp {
    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        if !self.settings.show_sidebar {
            return;
        }

        egui::SidePanel::left("sidebar")
            .default_width(SIDEBAR_DEFAULT_WIDTH)
            .min_width(SIDEBAR_MIN_WIDTH)
            .max_width(SIDEBAR_MAX_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(6.0);
                    ui.heading("Menu");
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.render_account_section(ui);
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.render_appearance_section(ui, ctx);
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.render_notification_section(ui);
                });
            });
    }

    fn render_account_section(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(greeting(self.settings.display_name.as_deref())).strong());
        ui.add_space(4.0);

        if self.settings.is_signed_in() {
            if ui.button("Sign Out").clicked() {
                self.confirm_dialog.request(ConfirmAction::SignOut);
            }
            return;
        }

        if !self.state.sign_in.is_open {
            if ui.button("Sign In").clicked() {
                self.state.sign_in.open();
            }
            return;
        }

        ui.label("Display name:");
        let response = ui.text_edit_singleline(&mut self.state.sign_in.name);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if let Some(error) = &self.state.sign_in.error {
            ui.colored_label(egui::Color32::RED, error);
        }

        ui.horizontal(|ui| {
            let can_submit = self.state.sign_in.submitted_name().is_some();
            let clicked = ui
                .add_enabled(can_submit, egui::Button::new("Sign In"))
                .clicked();
            if (clicked || submitted) && can_submit {
                self.sign_in();
            }
            if ui.button("Cancel").clicked() {
                self.state.sign_in.close();
            }
        });
    }

    fn render_appearance_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut dark_mode = self.settings.resolve_dark_mode(self.system_prefers_dark);
        if ui.checkbox(&mut dark_mode, "Dark mode").changed() {
            self.settings.dark_mode = Some(dark_mode);
            self.persist_settings();
            self.apply_theme(ctx);
        }

        if self.settings.dark_mode.is_some()
            && ui
                .small_button("Follow system theme")
                .on_hover_text("Forget the manual choice")
                .clicked()
        {
            self.settings.dark_mode = None;
            self.persist_settings();
            self.apply_theme(ctx);
        }
    }

    fn render_notification_section(&mut self, ui: &mut egui::Ui) {
        let status = self.settings.notification_permission;
        ui.label(RichText::new(format!("Notifications: {}", permission_label(status))).weak());
        if !status.is_granted() && ui.small_button("Enable notifications…").clicked() {
            self.state.show_permission_prompt = true;
        }
    }

    fn sign_in(&mut self) {
        let Some(name) = self.state.sign_in.submitted_name() else {
            return;
        };

        let previous = self.settings.display_name.replace(name.clone());
        match self.context.settings_service().update(&self.settings) {
            Ok(()) => {
                log::info!("Signed in as '{}'", name);
                self.state.sign_in.close();
                self.toast_manager.success(format!("Signed in as {}", name));
            }
            Err(err) => {
                log::warn!("Rejected display name: {:#}", err);
                self.settings.display_name = previous;
                self.state.sign_in.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn sign_out(&mut self) {
        self.settings.display_name = None;
        self.persist_settings();
        log::info!("Signed out");
        self.toast_manager.info("Signed out");
    }
}

fn permission_label(status: PermissionStatus) -> &'static str {
    match status {
        PermissionStatus::Granted => "on",
        PermissionStatus::Denied => "off",
        PermissionStatus::NotDetermined => "not set up",
    }
}
