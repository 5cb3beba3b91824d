use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    insert_default_settings(conn)?;
    create_entries_table(conn)?;
    run_entry_migrations(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            dark_mode INTEGER,
            display_name TEXT,
            show_sidebar INTEGER NOT NULL DEFAULT 0,
            notification_permission TEXT NOT NULL DEFAULT 'not_determined',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, show_sidebar, notification_permission)
         VALUES (1, 0, 'not_determined')",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS countdown_entries (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            last_reset TEXT NOT NULL,
            interval_days INTEGER NOT NULL DEFAULT 0,
            interval_hours INTEGER NOT NULL DEFAULT 0,
            interval_minutes INTEGER NOT NULL DEFAULT 0,
            notify_on_ready INTEGER NOT NULL DEFAULT 0,
            reset_on_save INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create countdown_entries table")?;

    Ok(())
}

/// The first schema revision only stored whole days.
fn run_entry_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "countdown_entries",
        "interval_hours",
        "ALTER TABLE countdown_entries ADD COLUMN interval_hours INTEGER NOT NULL DEFAULT 0",
    )?;

    migrations::ensure_column(
        conn,
        "countdown_entries",
        "interval_minutes",
        "ALTER TABLE countdown_entries ADD COLUMN interval_minutes INTEGER NOT NULL DEFAULT 0",
    )?;

    migrations::ensure_column(
        conn,
        "countdown_entries",
        "notify_on_ready",
        "ALTER TABLE countdown_entries ADD COLUMN notify_on_ready INTEGER NOT NULL DEFAULT 0",
    )?;

    migrations::ensure_column(
        conn,
        "countdown_entries",
        "reset_on_save",
        "ALTER TABLE countdown_entries ADD COLUMN reset_on_save INTEGER NOT NULL DEFAULT 0",
    )?;

    // SQLite refuses non-constant defaults in ALTER TABLE, so legacy rows get NULL here.
    migrations::ensure_column(
        conn,
        "countdown_entries",
        "created_at",
        "ALTER TABLE countdown_entries ADD COLUMN created_at TEXT",
    )?;

    migrations::ensure_column(
        conn,
        "countdown_entries",
        "updated_at",
        "ALTER TABLE countdown_entries ADD COLUMN updated_at TEXT",
    )?;

    Ok(())
}
