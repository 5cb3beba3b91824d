//! Database repository for countdown entries.
//!
//! This module provides CRUD operations for entries stored in SQLite.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::entry::{
    CountdownEntry, CountdownEntryId, Interval, MAX_INTERVAL_DAYS, MAX_INTERVAL_HOURS,
    MAX_INTERVAL_MINUTES,
};

const ENTRY_COLUMNS: &str = "id, title, details, last_reset,
    interval_days, interval_hours, interval_minutes,
    notify_on_ready, reset_on_save";

/// Repository for countdown entry database operations
pub struct EntryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> EntryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get every stored entry, oldest first
    pub fn list_all(&self) -> Result<Vec<CountdownEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM countdown_entries ORDER BY rowid",
            ENTRY_COLUMNS
        ))?;

        let entries = stmt
            .query_map([], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch countdown entries")?;

        Ok(entries)
    }

    /// Get a single entry by ID
    pub fn get(&self, id: CountdownEntryId) -> Result<Option<CountdownEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM countdown_entries WHERE id = ?",
            ENTRY_COLUMNS
        ))?;

        stmt.query_row([id.to_string()], row_to_entry)
            .optional()
            .context("Failed to fetch countdown entry")
    }

    /// Insert a new entry
    pub fn insert(&self, entry: &CountdownEntry) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO countdown_entries (
                    id, title, details, last_reset,
                    interval_days, interval_hours, interval_minutes,
                    notify_on_ready, reset_on_save,
                    created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)",
                params![
                    entry.id().to_string(),
                    entry.title,
                    entry.details,
                    entry.last_reset.to_rfc3339(),
                    entry.interval.days,
                    entry.interval.hours,
                    entry.interval.minutes,
                    entry.notify_on_ready,
                    entry.reset_on_save,
                ],
            )
            .context("Failed to insert countdown entry")?;

        Ok(())
    }

    /// Update an existing entry. Returns false when no row matched.
    pub fn update(&self, entry: &CountdownEntry) -> Result<bool> {
        let rows = self
            .conn
            .execute(
                "UPDATE countdown_entries SET
                    title = ?2, details = ?3, last_reset = ?4,
                    interval_days = ?5, interval_hours = ?6, interval_minutes = ?7,
                    notify_on_ready = ?8, reset_on_save = ?9,
                    updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1",
                params![
                    entry.id().to_string(),
                    entry.title,
                    entry.details,
                    entry.last_reset.to_rfc3339(),
                    entry.interval.days,
                    entry.interval.hours,
                    entry.interval.minutes,
                    entry.notify_on_ready,
                    entry.reset_on_save,
                ],
            )
            .context("Failed to update countdown entry")?;

        Ok(rows > 0)
    }

    /// Delete an entry by ID. Returns false when no row matched.
    pub fn delete(&self, id: CountdownEntryId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM countdown_entries WHERE id = ?", [id.to_string()])
            .context("Failed to delete countdown entry")?;
        Ok(rows > 0)
    }

}

// ========== Helper Functions ==========

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<CountdownEntry> {
    let id_str: String = row.get(0)?;
    let last_reset_str: String = row.get(3)?;

    let id = CountdownEntryId::parse(&id_str).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
    })?;

    let last_reset = DateTime::parse_from_rfc3339(&last_reset_str)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(err))
        })?;

    let interval = Interval::new(
        read_component(row, 4, MAX_INTERVAL_DAYS)?,
        read_component(row, 5, MAX_INTERVAL_HOURS)?,
        read_component(row, 6, MAX_INTERVAL_MINUTES)?,
    );

    Ok(CountdownEntry::restore(
        id,
        row.get(1)?,
        row.get(2)?,
        last_reset,
        interval,
        row.get(7)?,
        row.get(8)?,
    ))
}

/// Interval columns are plain integers written by anything with access to the
/// file; they are clamped to the ranges the form offers.
fn read_component(row: &Row<'_>, index: usize, max: u32) -> rusqlite::Result<u32> {
    let value: i64 = row.get(index)?;
    Ok(value.clamp(0, max as i64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn sample_entry(title: &str) -> CountdownEntry {
        let now = Local.with_ymd_and_hms(2025, 6, 10, 18, 45, 12).unwrap();
        let mut entry = CountdownEntry::new(title, "details here", Interval::new(2, 3, 4), now);
        entry.notify_on_ready = true;
        entry
    }

    #[test]
    fn insert_then_get_returns_same_entry() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        let entry = sample_entry("Water plants");

        repo.insert(&entry).unwrap();
        let loaded = repo.get(entry.id()).unwrap().expect("entry should exist");

        assert_eq!(loaded, entry);
    }

    #[test]
    fn get_missing_returns_none() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        assert!(repo.get(CountdownEntryId::new()).unwrap().is_none());
    }

    #[test]
    fn list_all_keeps_insertion_order() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        let first = sample_entry("First");
        let second = sample_entry("Second");
        repo.insert(&first).unwrap();
        repo.insert(&second).unwrap();

        let titles: Vec<String> = repo.list_all().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["First".to_string(), "Second".to_string()]);
    }

    #[test]
    fn update_overwrites_fields() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        let mut entry = sample_entry("Haircut");
        repo.insert(&entry).unwrap();

        entry.title = "Barber".to_string();
        entry.interval = Interval::new(28, 0, 0);
        entry.last_reset += Duration::days(1);
        entry.reset_on_save = true;
        assert!(repo.update(&entry).unwrap());

        assert_eq!(repo.get(entry.id()).unwrap(), Some(entry));
    }

    #[test]
    fn update_missing_reports_false() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        assert!(!repo.update(&sample_entry("ghost")).unwrap());
    }

    #[test]
    fn delete_removes_row() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        let entry = sample_entry("Gone soon");
        repo.insert(&entry).unwrap();

        assert!(repo.delete(entry.id()).unwrap());
        assert!(!repo.delete(entry.id()).unwrap());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_timestamp_is_an_error() {
        let db = setup_test_db();
        db.connection()
            .execute(
                "INSERT INTO countdown_entries (id, title, last_reset) VALUES (?1, 'bad', 'yesterday')",
                [CountdownEntryId::new().to_string()],
            )
            .unwrap();

        let repo = EntryRepository::new(db.connection());
        assert!(repo.list_all().is_err());
    }

    #[test]
    fn out_of_range_components_are_clamped_on_read() {
        let db = setup_test_db();
        let repo = EntryRepository::new(db.connection());
        let entry = sample_entry("Tampered");
        repo.insert(&entry).unwrap();

        db.connection()
            .execute(
                "UPDATE countdown_entries
                 SET interval_days = 100000000, interval_hours = -4, interval_minutes = 999
                 WHERE id = ?1",
                [entry.id().to_string()],
            )
            .unwrap();

        let loaded = repo.get(entry.id()).unwrap().expect("entry should exist");
        assert_eq!(
            loaded.interval,
            Interval::new(MAX_INTERVAL_DAYS, 0, MAX_INTERVAL_MINUTES)
        );
        assert!(loaded.remaining(entry.last_reset) > 0);
    }
}
