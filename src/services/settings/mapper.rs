use crate::models::settings::{PermissionStatus, Settings};
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    let permission: String = row.get(4)?;

    Ok(Settings {
        id: Some(row.get(0)?),
        dark_mode: row.get::<_, Option<i32>>(1)?.map(|value| value != 0),
        display_name: row.get(2)?,
        show_sidebar: row.get::<_, i32>(3)? != 0,
        notification_permission: permission.parse().unwrap_or_else(|err| {
            log::warn!("{}; treating permission as not determined", err);
            PermissionStatus::NotDetermined
        }),
    })
}
