//! Posolog — prescription dosing schedule and reminder engine.
//!
//! Takes the raw text an OCR step produced from a prescription photo, extracts
//! the medicine fields (name, dosage, frequency, duration), persists a record
//! with a rolling "next due" instant, and runs a polling reminder loop that
//! fires a reminder for each due record and advances its schedule.
//!
//! OCR itself, the upload front end, and real notification delivery are
//! external collaborators; this crate owns the extraction, the
//! frequency-to-interval parsing, the schedule arithmetic, and the loop.

pub mod config;
pub mod extraction;
pub mod ingest;
pub mod models;
pub mod reminder;
pub mod schedule;
pub mod store;
