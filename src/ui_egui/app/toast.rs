//! Toast notifications for brief feedback messages.
//!
//! Toasts appear in the bottom-right corner and fade away. They confirm save,
//! reset and delete actions.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

const TOAST_WIDTH: f32 = 300.0;
const TOAST_HEIGHT: f32 = 40.0;
const FADE_OUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Error => "✗",
        }
    }

    pub fn background_color(&self, is_dark_theme: bool) -> Color32 {
        if is_dark_theme {
            match self {
                ToastLevel::Success => Color32::from_rgb(30, 70, 40),
                ToastLevel::Info => Color32::from_rgb(30, 50, 80),
                ToastLevel::Error => Color32::from_rgb(80, 30, 30),
            }
        } else {
            match self {
                ToastLevel::Success => Color32::from_rgb(220, 255, 220),
                ToastLevel::Info => Color32::from_rgb(220, 235, 255),
                ToastLevel::Error => Color32::from_rgb(255, 220, 220),
            }
        }
    }

    pub fn text_color(&self, is_dark_theme: bool) -> Color32 {
        if is_dark_theme {
            match self {
                ToastLevel::Success => Color32::from_rgb(100, 220, 120),
                ToastLevel::Info => Color32::from_rgb(100, 180, 255),
                ToastLevel::Error => Color32::from_rgb(255, 120, 120),
            }
        } else {
            match self {
                ToastLevel::Success => Color32::from_rgb(30, 120, 50),
                ToastLevel::Info => Color32::from_rgb(30, 80, 150),
                ToastLevel::Error => Color32::from_rgb(180, 40, 40),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Opacity for the fade out over the last half second
    pub fn opacity(&self) -> f32 {
        opacity_at(self.created_at.elapsed(), self.duration)
    }
}

fn opacity_at(elapsed: Duration, duration: Duration) -> f32 {
    let fade_start = duration.saturating_sub(FADE_OUT);

    if elapsed >= duration {
        0.0
    } else if elapsed >= fade_start {
        ((duration - elapsed).as_secs_f32() / FADE_OUT.as_secs_f32()).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Info));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastLevel::Error));
    }

    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Render all active toasts, stacking upward from the bottom-right
    pub fn render(&mut self, ctx: &Context, is_dark_theme: bool) {
        self.cleanup();

        if self.toasts.is_empty() {
            return;
        }

        // Keep animating the fade
        ctx.request_repaint();

        let screen_rect = ctx.screen_rect();
        let margin = 10.0;
        let spacing = 5.0;

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (TOAST_HEIGHT + spacing);
            let pos = Pos2::new(
                screen_rect.right() - TOAST_WIDTH - margin,
                screen_rect.bottom() - TOAST_HEIGHT - margin - y_offset,
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let bg_color = toast.level.background_color(is_dark_theme);
                    let text_color = toast.level.text_color(is_dark_theme);

                    let bg_color = Color32::from_rgba_unmultiplied(
                        bg_color.r(),
                        bg_color.g(),
                        bg_color.b(),
                        (230.0 * opacity) as u8,
                    );
                    let text_color = Color32::from_rgba_unmultiplied(
                        text_color.r(),
                        text_color.g(),
                        text_color.b(),
                        (255.0 * opacity) as u8,
                    );

                    egui::Frame::none()
                        .fill(bg_color)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, text_color.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(TOAST_WIDTH - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(toast.level.icon())
                                        .color(text_color)
                                        .strong(),
                                );
                                ui.label(RichText::new(&toast.message).color(text_color));
                            });
                        });
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_fades_over_last_half_second() {
        let duration = Duration::from_secs(3);
        assert_eq!(opacity_at(Duration::from_secs(1), duration), 1.0);
        let mid = opacity_at(Duration::from_millis(2750), duration);
        assert!(mid > 0.4 && mid < 0.6);
        assert_eq!(opacity_at(Duration::from_secs(3), duration), 0.0);
    }

    #[test]
    fn expired_toasts_are_dropped() {
        let mut manager = ToastManager::new();
        manager.add(Toast {
            duration: Duration::ZERO,
            ..Toast::new("gone", ToastLevel::Info)
        });
        manager.success("kept");

        manager.cleanup();
        assert_eq!(manager.toasts.len(), 1);
        assert_eq!(manager.toasts[0].message, "kept");
    }
}
