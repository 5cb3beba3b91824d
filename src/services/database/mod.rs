// Database service module
// SQLite database connection and schema management

mod connection;
pub mod migrations;
mod schema;

pub use connection::Database;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_new_database_in_memory() {
        let result = Database::new(":memory:");
        assert!(result.is_ok(), "Should create in-memory database");
    }

    #[test]
    fn test_new_database_with_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().unwrap();

        let result = Database::new(db_path_str);
        assert!(result.is_ok(), "Should create file-based database");
        assert!(Path::new(db_path_str).exists(), "Database file should exist");
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let db = Database::new(":memory:").unwrap();
        assert!(db.initialize_schema().is_ok());
        assert!(db.initialize_schema().is_ok(), "Second run should be a no-op");
    }

    #[test]
    fn test_entries_table_exists() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='countdown_entries'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 1, "countdown_entries table should exist");
    }

    #[test]
    fn test_default_settings_inserted() {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();

        let result: (i64, String, i64) = db
            .connection()
            .query_row(
                "SELECT id, notification_permission, show_sidebar FROM settings WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();

        assert_eq!(result, (1, "not_determined".to_string(), 0));
    }

    #[test]
    fn test_legacy_days_only_table_is_migrated() {
        let db = Database::new(":memory:").unwrap();
        db.connection()
            .execute(
                "CREATE TABLE countdown_entries (
                    id TEXT PRIMARY KEY,
                    title TEXT NOT NULL,
                    details TEXT NOT NULL DEFAULT '',
                    last_reset TEXT NOT NULL,
                    interval_days INTEGER NOT NULL DEFAULT 0
                )",
                [],
            )
            .unwrap();

        db.initialize_schema().unwrap();

        for column in ["interval_hours", "interval_minutes", "notify_on_ready", "reset_on_save"] {
            assert!(
                migrations::column_exists(db.connection(), "countdown_entries", column).unwrap(),
                "{} should have been added",
                column
            );
        }
    }
}
