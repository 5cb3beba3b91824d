use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, dark_mode, display_name, show_sidebar, notification_permission
                 FROM settings WHERE id = 1",
                [],
                |row| row_to_settings(row),
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();
        let display_name = settings
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        conn.execute(
            "UPDATE settings \
             SET dark_mode = ?1, \
                 display_name = ?2, \
                 show_sidebar = ?3, \
                 notification_permission = ?4, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                settings.dark_mode.map(|dark| dark as i32),
                display_name,
                settings.show_sidebar as i32,
                settings.notification_permission.as_str(),
            ),
        )
        .context("Failed to update settings")?;

        Ok(())
    }
}
