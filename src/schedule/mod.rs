//! Dose scheduling: timestamp codec, frequency parsing, next-due arithmetic.
//!
//! Timestamps are naive local time at second precision and persist as
//! `YYYY-MM-DD HH:MM:SS` text. Due-window filtering compares that text
//! lexically, which matches chronological order for this format — keep the
//! two in sync if either ever changes.

pub mod due;
pub mod interval;

pub use due::next_due_after;
pub use interval::{interval_for, parse_frequency, FrequencyInterval, FrequencyRule};

use chrono::{Local, NaiveDateTime, Timelike};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
}

/// Current local time truncated to whole seconds, so every instant the
/// engine produces survives a format/parse round trip unchanged.
pub fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
