//! One-time notification permission flow.
//!
//! The desktop has no system-wide permission prompt, so the app asks once and
//! remembers the answer in settings. The status is checked at launch and
//! re-read after every decision.

use anyhow::Result;

use crate::models::settings::PermissionStatus;
use crate::services::database::Database;
use crate::services::settings::SettingsService;

pub const PROMPT_TITLE: &str = "Enable Notifications?";
pub const PROMPT_MESSAGE: &str = "EverySo uses notifications to remind you when your timers are ready. You can always change this later from the menu.";

pub struct PermissionService<'a> {
    settings: SettingsService<'a>,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            settings: SettingsService::new(db),
        }
    }

    /// Current stored decision. Unreadable settings count as undecided.
    pub fn status(&self) -> PermissionStatus {
        match self.settings.get() {
            Ok(settings) => settings.notification_permission,
            Err(err) => {
                log::warn!("Failed to read notification permission: {:#}", err);
                PermissionStatus::NotDetermined
            }
        }
    }

    /// Whether the prompt should be shown.
    pub fn should_prompt(&self) -> bool {
        self.status() == PermissionStatus::NotDetermined
    }

    /// Stores the user's answer and returns the status as re-read from storage.
    pub fn record_decision(&self, granted: bool) -> Result<PermissionStatus> {
        let mut settings = self.settings.get()?;
        settings.notification_permission = if granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.settings.update(&settings)?;

        let status = self.status();
        log::info!("Notification permission is now {}", status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn fresh_install_prompts() {
        let db = setup_test_db();
        let service = PermissionService::new(&db);
        assert_eq!(service.status(), PermissionStatus::NotDetermined);
        assert!(service.should_prompt());
    }

    #[test]
    fn decision_is_persisted_and_rechecked() {
        let db = setup_test_db();
        let service = PermissionService::new(&db);

        assert_eq!(service.record_decision(true).unwrap(), PermissionStatus::Granted);
        assert!(!service.should_prompt());

        let reopened = PermissionService::new(&db);
        assert_eq!(reopened.status(), PermissionStatus::Granted);

        assert_eq!(reopened.record_decision(false).unwrap(), PermissionStatus::Denied);
        assert!(!reopened.should_prompt());
    }

    #[test]
    fn decision_keeps_other_settings() {
        let db = setup_test_db();
        let settings_service = SettingsService::new(&db);
        let mut settings = settings_service.get().unwrap();
        settings.display_name = Some("Sam".to_string());
        settings_service.update(&settings).unwrap();

        PermissionService::new(&db).record_decision(true).unwrap();

        assert_eq!(
            settings_service.get().unwrap().display_name.as_deref(),
            Some("Sam")
        );
    }
}
