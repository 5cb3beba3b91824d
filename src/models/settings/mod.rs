// Settings module
// Persisted UI state: theme, display name, sidebar and notification permission

use std::fmt;
use std::str::FromStr;

/// Outcome of the one-time notification permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// The user has not been asked yet
    #[default]
    NotDetermined,
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionStatus::NotDetermined => "not_determined",
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_determined" => Ok(PermissionStatus::NotDetermined),
            "granted" => Ok(PermissionStatus::Granted),
            "denied" => Ok(PermissionStatus::Denied),
            other => Err(format!("Unknown permission status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub id: Option<i64>,
    /// `None` until the user flips the toggle; the system theme decides until then
    pub dark_mode: Option<bool>,
    /// Name shown in the sidebar after signing in
    pub display_name: Option<String>,
    pub show_sidebar: bool,
    pub notification_permission: PermissionStatus,
}

impl Settings {
    pub fn is_signed_in(&self) -> bool {
        self.display_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    /// Resolves the effective theme, falling back to the given system preference.
    pub fn resolve_dark_mode(&self, system_prefers_dark: bool) -> bool {
        self.dark_mode.unwrap_or(system_prefers_dark)
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.display_name {
            if name.chars().count() > 64 {
                return Err("Display name is too long (max 64 characters)".to_string());
            }
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            dark_mode: None,
            display_name: None,
            show_sidebar: false,
            notification_permission: PermissionStatus::NotDetermined,
        }
    }
}
