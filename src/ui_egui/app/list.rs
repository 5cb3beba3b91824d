//! Top bar and the scrollable list of countdown rows.

use chrono::{DateTime, Local};
use egui::{Color32, RichText};

use super::confirm::ConfirmAction;
use super::EverySoApp;
use crate::models::entry::{CountdownEntry, CountdownEntryId};
use crate::services::countdown::progress_percent;
use crate::ui_egui::theme::AppTheme;

const ROW_ROUNDING: f32 = 8.0;
const ROW_SPACING: f32 = 6.0;

/// What the user clicked on a row this frame
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowAction {
    Reset(CountdownEntryId),
    Edit(CountdownEntryId),
    Delete { id: CountdownEntryId, title: String },
}

/// Title line, with a marker once the countdown has finished.
pub fn row_heading(entry: &CountdownEntry, now: DateTime<Local>) -> String {
    if entry.is_ready(now) {
        format!("{} (Done)", entry.title)
    } else {
        entry.title.clone()
    }
}

pub fn progress_label(entry: &CountdownEntry, now: DateTime<Local>) -> String {
    format!("Progress: {}%", progress_percent(entry.progress(now)))
}

impl EverySoApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .button("☰")
                    .on_hover_text("Toggle menu")
                    .clicked()
                {
                    self.settings.show_sidebar = !self.settings.show_sidebar;
                    self.persist_settings();
                }

                ui.heading("EverySo");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("➕ Add").clicked() {
                        self.open_new_entry_dialog();
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    pub(super) fn render_entry_list(&mut self, ctx: &egui::Context) {
        let now = self.ticker.now();
        let theme = self.active_theme.clone();
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.entries.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Nothing to track yet. Press Add to start a countdown.")
                            .color(theme.text_secondary),
                    );
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for entry in &self.entries {
                        if let Some(action) = render_row(ui, entry, now, &theme) {
                            actions.push(action);
                        }
                        ui.add_space(ROW_SPACING);
                    }
                });
        });

        for action in actions {
            match action {
                RowAction::Reset(id) => self.reset_entry(id),
                RowAction::Edit(id) => self.open_edit_dialog(id),
                RowAction::Delete { id, title } => {
                    self.confirm_dialog
                        .request(ConfirmAction::DeleteEntry { id, title });
                }
            }
        }
    }
}

fn render_row(
    ui: &mut egui::Ui,
    entry: &CountdownEntry,
    now: DateTime<Local>,
    theme: &AppTheme,
) -> Option<RowAction> {
    let is_ready = entry.is_ready(now);
    let mut action = None;

    egui::Frame::none()
        .fill(theme.row_fill(is_ready))
        .rounding(ROW_ROUNDING)
        .stroke(egui::Stroke::new(1.0, theme.row_border))
        .inner_margin(egui::Margin::symmetric(12.0, 10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(row_heading(entry, now))
                        .strong()
                        .size(16.0)
                        .color(theme.text_primary),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.menu_button("⋯", |ui| {
                        if ui.button("✏ Edit").clicked() {
                            action = Some(RowAction::Edit(entry.id()));
                            ui.close_menu();
                        }
                        if ui
                            .button(RichText::new("🗑 Delete").color(Color32::from_rgb(200, 60, 60)))
                            .clicked()
                        {
                            action = Some(RowAction::Delete {
                                id: entry.id(),
                                title: entry.title.clone(),
                            });
                            ui.close_menu();
                        }
                    });

                    if ui.button("↺ Reset").clicked() {
                        action = Some(RowAction::Reset(entry.id()));
                    }
                });
            });

            if !entry.details.trim().is_empty() {
                ui.label(RichText::new(&entry.details).color(theme.text_secondary));
            }

            ui.horizontal(|ui| {
                ui.label(RichText::new(progress_label(entry, now)).color(theme.text_secondary));
                ui.label(
                    RichText::new(entry.formatted_remaining(now))
                        .color(theme.text_secondary)
                        .monospace(),
                );
            });

            ui.add(
                egui::ProgressBar::new(entry.progress(now) as f32)
                    .fill(theme.bar_fill(is_ready))
                    .desired_height(8.0),
            );
        });

    action
}
