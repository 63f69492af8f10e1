pub mod medicine;
pub mod sqlite;

pub use medicine::SqliteStore;
pub use sqlite::{open_database, open_memory_database};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{DueMedicine, MedicineFields, MedicineRecord};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("medicine name missing, record not persisted")]
    NameMissing,

    #[error("medicine not found: id {id}")]
    NotFound { id: i64 },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("invalid timestamp in column {column}: {value}")]
    InvalidTimestamp { column: String, value: String },
}

/// The record-store seam the engine talks through.
///
/// The reminder loop and the ingest pipeline only ever use these four
/// operations, so swapping the SQLite implementation for a remote store
/// leaves the engine untouched. Implementations must make `mark_taken`
/// atomic per record; the engine never mutates a record any other way.
pub trait MedicineStore {
    /// Persist a new record. Rejects fields without a non-blank name —
    /// nothing is written in that case.
    fn create_record(
        &self,
        fields: &MedicineFields,
        initial_next_due: NaiveDateTime,
    ) -> Result<i64, StoreError>;

    /// Records whose next-due instant falls within `[from, to]`, both
    /// bounds inclusive.
    fn fetch_due_within(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<DueMedicine>, StoreError>;

    /// Record a taken event: set last-taken and the recomputed next-due.
    fn mark_taken(
        &self,
        id: i64,
        last_taken: NaiveDateTime,
        next_due: NaiveDateTime,
    ) -> Result<(), StoreError>;

    /// All records, for diagnostics and listing.
    fn fetch_all(&self) -> Result<Vec<MedicineRecord>, StoreError>;
}
