//! Theme module for the egui tracker window
//!
//! Defines the light and dark palettes and the tint used for ready rows.

use egui::Color32;

#[derive(Debug, Clone, PartialEq)]
pub struct AppTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Background of a row that is still counting down
    pub row_background: Color32,

    /// Background of a row whose countdown finished
    pub ready_background: Color32,

    /// Border around each row
    pub row_border: Color32,

    /// Progress bar fill
    pub progress_fill: Color32,

    /// Progress bar fill once ready
    pub ready_fill: Color32,

    /// Primary text color (titles)
    pub text_primary: Color32,

    /// Secondary text color (details, progress line)
    pub text_secondary: Color32,
}

impl AppTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            row_background: Color32::from_rgb(255, 255, 255),
            ready_background: Color32::from_rgb(226, 244, 228),
            row_border: Color32::from_rgb(220, 220, 220),
            progress_fill: Color32::from_rgb(100, 150, 255),
            ready_fill: Color32::from_rgb(60, 160, 80),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    /// The ready tint is stronger here so it reads against the dark rows.
    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            row_background: Color32::from_rgb(40, 40, 40),
            ready_background: Color32::from_rgb(34, 84, 46),
            row_border: Color32::from_rgb(60, 60, 60),
            progress_fill: Color32::from_rgb(100, 150, 255),
            ready_fill: Color32::from_rgb(90, 200, 110),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    pub fn for_mode(is_dark: bool) -> Self {
        if is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn row_fill(&self, is_ready: bool) -> Color32 {
        if is_ready {
            self.ready_background
        } else {
            self.row_background
        }
    }

    pub fn bar_fill(&self, is_ready: bool) -> Color32 {
        if is_ready {
            self.ready_fill
        } else {
            self.progress_fill
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}

/// Reads the desktop's light/dark preference.
pub fn system_prefers_dark() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}
