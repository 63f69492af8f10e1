//! SQLite-backed medicine store.
//!
//! Timestamps live in the database as `YYYY-MM-DD HH:MM:SS` text; the
//! due-window query compares them lexically, which for this format equals
//! chronological comparison. All record mutation goes through single UPDATE
//! statements, so per-record atomicity comes from SQLite itself.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use super::{sqlite, MedicineStore, StoreError};
use crate::models::{DueMedicine, MedicineFields, MedicineRecord};
use crate::schedule::{format_timestamp, local_now, parse_timestamp};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            conn: sqlite::open_database(path)?,
        })
    }

    /// In-memory store (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: sqlite::open_memory_database()?,
        })
    }
}

impl MedicineStore for SqliteStore {
    fn create_record(
        &self,
        fields: &MedicineFields,
        initial_next_due: NaiveDateTime,
    ) -> Result<i64, StoreError> {
        // Validate before touching the database so a rejected record
        // never claims an id.
        let name = fields
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(StoreError::NameMissing)?;

        self.conn.execute(
            "INSERT INTO medicines (name, dosage, frequency, duration, start_date, next_due)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                name,
                fields.dosage,
                fields.frequency,
                fields.duration,
                local_now().date(),
                format_timestamp(initial_next_due),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn fetch_due_within(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<DueMedicine>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, dosage, frequency, next_due
             FROM medicines
             WHERE next_due >= ?1 AND next_due <= ?2
             ORDER BY next_due",
        )?;

        let rows = stmt.query_map(
            params![format_timestamp(from), format_timestamp(to)],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )?;

        let mut due = Vec::new();
        for row in rows {
            let (id, name, dosage, frequency, next_due) = row?;
            due.push(DueMedicine {
                id,
                name,
                dosage,
                frequency,
                next_due: timestamp_column("next_due", &next_due)?,
            });
        }
        Ok(due)
    }

    fn mark_taken(
        &self,
        id: i64,
        last_taken: NaiveDateTime,
        next_due: NaiveDateTime,
    ) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE medicines SET last_taken = ?1, next_due = ?2 WHERE id = ?3",
            params![
                format_timestamp(last_taken),
                format_timestamp(next_due),
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound { id });
        }
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<MedicineRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, dosage, frequency, duration, start_date, last_taken, next_due
             FROM medicines
             ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, NaiveDate>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, String>(7)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, name, dosage, frequency, duration, start_date, last_taken, next_due) = row?;
            records.push(MedicineRecord {
                id,
                name,
                dosage,
                frequency,
                duration,
                start_date,
                last_taken: last_taken
                    .map(|t| timestamp_column("last_taken", &t))
                    .transpose()?,
                next_due: timestamp_column("next_due", &next_due)?,
            });
        }
        Ok(records)
    }
}

fn timestamp_column(column: &str, value: &str) -> Result<NaiveDateTime, StoreError> {
    parse_timestamp(value).map_err(|_| StoreError::InvalidTimestamp {
        column: column.to_string(),
        value: value.to_string(),
    })
}
