use anyhow::{Context, Result};
use rusqlite::Connection;

/// Checks whether a column exists on a table.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let exists: i32 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to inspect columns of {}", table))?;

    Ok(exists > 0)
}

/// Adds a column if it does not already exist.
pub fn ensure_column(conn: &Connection, table: &str, column: &str, ddl: &str) -> Result<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }

    conn.execute(ddl, [])
        .with_context(|| format!("Failed to add {}.{}", table, column))?;
    log::info!("Migrated {}: added column {}", table, column);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn_with_table() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE things (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        conn
    }

    #[test]
    fn column_exists_reports_presence() {
        let conn = conn_with_table();
        assert!(column_exists(&conn, "things", "id").unwrap());
        assert!(!column_exists(&conn, "things", "name").unwrap());
    }

    #[test]
    fn ensure_column_adds_once() {
        let conn = conn_with_table();
        let ddl = "ALTER TABLE things ADD COLUMN name TEXT";

        ensure_column(&conn, "things", "name", ddl).unwrap();
        assert!(column_exists(&conn, "things", "name").unwrap());

        // Running the same DDL again would fail if it weren't skipped
        ensure_column(&conn, "things", "name", ddl).unwrap();
    }
}
