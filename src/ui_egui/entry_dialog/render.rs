use egui::{Color32, RichText};

use crate::models::entry::{MAX_INTERVAL_DAYS, MAX_INTERVAL_HOURS, MAX_INTERVAL_MINUTES};

use super::state::EntryDialogState;

const FORM_LABEL_WIDTH: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDialogAction {
    None,
    /// Save was pressed; the caller validates and stores the draft
    Save,
    Cancel,
}

pub fn render_entry_dialog(ctx: &egui::Context, state: &mut EntryDialogState) -> EntryDialogAction {
    let mut action = EntryDialogAction::None;
    let mut dialog_open = true;
    let form_enabled = state.alert.is_none();

    egui::Window::new(state.window_title())
        .open(&mut dialog_open)
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_enabled_ui(form_enabled, |ui| {
                render_details_section(ui, state);
                ui.add_space(8.0);
                render_interval_section(ui, state);
                ui.add_space(8.0);
                render_options_section(ui, state);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);
                action = render_action_buttons(ui, state);
            });
        });

    if !dialog_open {
        action = EntryDialogAction::Cancel;
    }

    render_alert(ctx, state);

    action
}

fn render_details_section(ui: &mut egui::Ui, state: &mut EntryDialogState) {
    ui.heading("Details");
    ui.add_space(4.0);

    labeled_row(ui, "Title:", |ui| {
        ui.add(
            egui::TextEdit::singleline(&mut state.draft.title)
                .hint_text("Water the plants")
                .desired_width(f32::INFINITY),
        );
    });

    labeled_row(ui, "Description:", |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut state.draft.description)
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
    });
}

fn render_interval_section(ui: &mut egui::Ui, state: &mut EntryDialogState) {
    ui.heading("Every");
    ui.add_space(4.0);

    let draft = &mut state.draft;
    labeled_row(ui, "Days:", |ui| {
        ui.add(egui::DragValue::new(&mut draft.days).range(0..=MAX_INTERVAL_DAYS));
    });
    labeled_row(ui, "Hours:", |ui| {
        ui.add(egui::DragValue::new(&mut draft.hours).range(0..=MAX_INTERVAL_HOURS));
    });
    labeled_row(ui, "Minutes:", |ui| {
        ui.add(egui::DragValue::new(&mut draft.minutes).range(0..=MAX_INTERVAL_MINUTES));
    });
    draft.clamp_components();
}

fn render_options_section(ui: &mut egui::Ui, state: &mut EntryDialogState) {
    ui.checkbox(&mut state.draft.notify_on_ready, "Remind me when ready");
    ui.checkbox(&mut state.draft.reset_on_save, "Reset countdown on save");
}

fn render_action_buttons(ui: &mut egui::Ui, state: &EntryDialogState) -> EntryDialogAction {
    let mut action = EntryDialogAction::None;

    ui.horizontal(|ui| {
        let can_save = state.can_save();
        let save_button = egui::Button::new("Save").fill(if can_save {
            Color32::from_rgb(70, 120, 200)
        } else {
            Color32::from_gray(60)
        });

        ui.add_enabled_ui(can_save, |ui| {
            if ui.add(save_button).clicked() {
                action = EntryDialogAction::Save;
            }
        });

        if !can_save {
            ui.label(
                RichText::new("(Title required)")
                    .small()
                    .color(Color32::from_gray(150)),
            );
        }

        if ui.button("Cancel").clicked() {
            action = EntryDialogAction::Cancel;
        }
    });

    action
}

/// The form stays disabled until the alert is dismissed.
fn render_alert(ctx: &egui::Context, state: &mut EntryDialogState) {
    let Some(error) = state.alert else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(error.alert_title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(300.0);
            ui.label(error.to_string());
            ui.add_space(10.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
        state.dismiss_alert();
    }
}

fn labeled_row(ui: &mut egui::Ui, label: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [FORM_LABEL_WIDTH, 20.0],
            egui::Label::new(RichText::new(label).strong()),
        );
        add_contents(ui);
    });
}
