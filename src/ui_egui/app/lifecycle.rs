use std::sync::Arc;

use super::confirm::ConfirmDialogState;
use super::context::AppContext;
use super::state::AppState;
use super::toast::ToastManager;
use super::EverySoApp;
use crate::models::settings::Settings;
use crate::services::clock::{Clock, SystemClock, Ticker};
use crate::services::database::Database;
use crate::services::notification::DesktopNotifier;
use crate::services::settings::SettingsService;
use crate::ui_egui::theme::{system_prefers_dark, AppTheme};

pub const APP_NAME: &str = "EverySo";

impl EverySoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, database: &'static Database) -> Self {
        let settings_service = SettingsService::new(database);
        let settings = load_settings_or_default(&settings_service);

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let notifier = Arc::new(DesktopNotifier::new(APP_NAME));
        notifier.set_enabled(settings.notification_permission.is_granted());

        let context = AppContext::new(database, notifier, Arc::clone(&clock));
        if let Err(err) = context.start_scheduler() {
            log::error!("Failed to start notification scheduler: {:#}", err);
        }

        let entry_service = context.entry_service();
        let entries = entry_service.list();
        entry_service.restore_notifications();
        log::info!("Loaded {} countdown entries", entries.len());

        let state = AppState {
            show_permission_prompt: context.permission_service().should_prompt(),
            ..AppState::default()
        };

        let mut app = Self {
            context,
            settings,
            entries,
            ticker: Ticker::new(clock.now()),
            system_prefers_dark: system_prefers_dark(),
            active_theme: AppTheme::light(),
            entry_dialog: None,
            state,
            toast_manager: ToastManager::new(),
            confirm_dialog: ConfirmDialogState::new(),
        };

        app.apply_theme(&cc.egui_ctx);
        app
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.context.clock().now();
        self.ticker.tick(now);

        self.render_top_bar(ctx);

        // Sidebar before CentralPanel so it takes left space
        self.render_sidebar(ctx);

        self.render_entry_list(ctx);
        self.render_entry_dialog(ctx);
        self.render_permission_prompt(ctx);
        self.handle_confirm_dialog(ctx);

        // Toasts last, so they appear on top
        let is_dark = self.active_theme.is_dark;
        self.toast_manager.render(ctx, is_dark);

        ctx.request_repaint_after(self.ticker.until_next_tick(self.context.clock().now()));
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Shutting down");
        self.context.scheduler().shutdown();
        self.persist_settings();
    }
}

fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            Settings::default()
        }
    }
}
