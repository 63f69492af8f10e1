//! From raw OCR text to a persisted, scheduled medicine record.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::extraction::extract_fields;
use crate::models::MedicineFields;
use crate::schedule::{format_timestamp, next_due_after};
use crate::store::{MedicineStore, StoreError};

#[derive(Error, Debug)]
pub enum IngestError {
    /// No medicine name could be extracted — the input is rejected and
    /// nothing is persisted. Surfaced to the user, never stored as a
    /// placeholder record.
    #[error("could not extract a medicine name from the text")]
    NameMissing,

    #[error(transparent)]
    Store(StoreError),
}

/// Result of a successful ingest, for presentation to the caller.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub id: i64,
    pub fields: MedicineFields,
    pub next_due: NaiveDateTime,
}

/// Extract fields from raw text and persist a record scheduled from `now`.
///
/// The frequency phrase may be absent; the schedule then defaults to one
/// dose every 24 hours and the stored record keeps the field absent rather
/// than inventing a phrase.
pub fn ingest_text<S: MedicineStore>(
    store: &S,
    text: &str,
    now: NaiveDateTime,
) -> Result<IngestOutcome, IngestError> {
    let fields = extract_fields(text);
    if !fields.has_name() {
        return Err(IngestError::NameMissing);
    }

    if fields.frequency.is_none() {
        tracing::warn!(
            medicine = fields.name.as_deref().unwrap_or_default(),
            "no frequency extracted, scheduling one dose every 24 hours"
        );
    }

    let next_due = next_due_after(now, fields.frequency.as_deref());
    let id = match store.create_record(&fields, next_due) {
        Ok(id) => id,
        Err(StoreError::NameMissing) => return Err(IngestError::NameMissing),
        Err(e) => return Err(IngestError::Store(e)),
    };

    tracing::info!(
        id,
        medicine = fields.name.as_deref().unwrap_or_default(),
        next_due = %format_timestamp(next_due),
        "medicine record created"
    );

    Ok(IngestOutcome {
        id,
        fields,
        next_due,
    })
}
