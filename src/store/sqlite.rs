use std::path::Path;

use rusqlite::Connection;

use super::StoreError;

/// Schema migrations, applied in order. Each script records its own row
/// in `schema_version`.
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../resources/migrations/001_initial.sql"),
)];

/// Open (or create) the database at the given path, ready to use.
pub fn open_database(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// One writer (the reminder loop) plus occasional CLI readers: WAL keeps
/// the readers from blocking on the loop's updates.
fn configure_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA synchronous=NORMAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}

/// Apply any migrations newer than the current schema version.
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    let applied = current_version(conn);

    for &(version, sql) in MIGRATIONS {
        if version <= applied {
            continue;
        }
        tracing::info!(version, "applying schema migration");
        conn.execute_batch(sql)
            .map_err(|e| StoreError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
    }

    Ok(())
}

/// Current schema version; 0 for a fresh database (no `schema_version`
/// table yet, or no rows in it).
fn current_version(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_initializes_medicines_table() {
        let conn = open_memory_database().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='medicines'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = open_memory_database().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(current_version(&conn), 1);
    }

    #[test]
    fn next_due_index_exists() {
        let conn = open_memory_database().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name='idx_medicines_next_due'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
