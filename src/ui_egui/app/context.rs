use std::sync::Arc;

use anyhow::Result;

use crate::services::clock::Clock;
use crate::services::database::Database;
use crate::services::entry::EntryService;
use crate::services::notification::{DesktopNotifier, NotificationScheduler, Notifier};
use crate::services::permission::PermissionService;
use crate::services::settings::SettingsService;

/// Shared access point for services and resources that multiple app modules need.
pub struct AppContext {
    database: &'static Database,
    scheduler: NotificationScheduler,
    notifier: Arc<DesktopNotifier>,
    clock: Arc<dyn Clock>,
}

impl AppContext {
    pub fn new(
        database: &'static Database,
        notifier: Arc<DesktopNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            database,
            scheduler: NotificationScheduler::new(),
            notifier,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn notifier(&self) -> &DesktopNotifier {
        &self.notifier
    }

    pub fn scheduler(&self) -> &NotificationScheduler {
        &self.scheduler
    }

    /// Starts the delivery worker on the shared notifier and clock.
    pub fn start_scheduler(&self) -> Result<()> {
        let notifier: Arc<dyn Notifier> = self.notifier.clone();
        self.scheduler.start(notifier, Arc::clone(&self.clock))
    }

    pub fn entry_service(&self) -> EntryService<'_> {
        EntryService::new(
            self.database.connection(),
            &self.scheduler,
            self.clock.as_ref(),
        )
    }

    pub fn settings_service(&self) -> SettingsService<'_> {
        SettingsService::new(self.database)
    }

    pub fn permission_service(&self) -> PermissionService<'_> {
        PermissionService::new(self.database)
    }
}
