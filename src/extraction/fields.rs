//! Pulls the four medicine fields out of OCR'd prescription text.
//!
//! Each field is anchored on a case-insensitive label (`Medicine:`, `Dose:`,
//! `Frequency:`, `Duration:`) and captured with a field-specific shape.
//! Free-text captures (name, frequency) stop at the next known label or line
//! end, so both single-line OCR output and one-field-per-line layouts extract
//! cleanly. A label that is missing or whose value fails its shape yields an
//! absent field; extraction itself never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::MedicineFields;

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)medicine:[ \t]*(.+?)\s*(?:$|dose:|frequency:|duration:)").unwrap()
});

/// Dosage must be a number loosely followed by a unit token; free text
/// like "as needed" is not a dosage.
static DOSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)dose:\s*(\d+\s*(?:mg|mcg|g|ml|iu|tablets?|capsules?|drops?|puffs?|units?))\b")
        .unwrap()
});

static FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)frequency:[ \t]*(.+?)\s*(?:$|dose:|medicine:|duration:)").unwrap()
});

/// Filler words the OCR step tends to glue onto the value ("for 10 days",
/// "duration 3 weeks") sit outside the capture and are dropped.
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)duration:\s*(?:(?:for|duration)\s+)?(\d+\s*(?:day|week|month|year)s?)")
        .unwrap()
});

/// Extract medicine fields from a block of raw text.
///
/// Pure and total: identical input gives identical output, and any input
/// (including empty text) produces a `MedicineFields` value. Takes the first
/// occurrence of each label in document order.
pub fn extract_fields(text: &str) -> MedicineFields {
    MedicineFields {
        name: capture(&NAME, text),
        dosage: capture(&DOSAGE, text),
        frequency: capture(&FREQUENCY, text),
        duration: capture(&DURATION, text),
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text).and_then(|caps| {
        let value = caps.get(1)?.as_str().trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields_from_single_line() {
        let fields = extract_fields(
            "Medicine: Paracetamol Dose: 500 mg Frequency: Twice a day Duration: 7 days",
        );
        assert_eq!(fields.name.as_deref(), Some("Paracetamol"));
        assert_eq!(fields.dosage.as_deref(), Some("500 mg"));
        assert_eq!(fields.frequency.as_deref(), Some("Twice a day"));
        assert_eq!(fields.duration.as_deref(), Some("7 days"));
    }

    #[test]
    fn extracts_from_one_field_per_line() {
        let fields = extract_fields(
            "Medicine: Amoxicillin\nDose: 250mg\nFrequency: every 8 hours\nDuration: for 10 days",
        );
        assert_eq!(fields.name.as_deref(), Some("Amoxicillin"));
        assert_eq!(fields.dosage.as_deref(), Some("250mg"));
        assert_eq!(fields.frequency.as_deref(), Some("every 8 hours"));
        assert_eq!(fields.duration.as_deref(), Some("10 days"));
    }

    #[test]
    fn name_is_trimmed() {
        let fields = extract_fields("Medicine:    Ibuprofen   ");
        assert_eq!(fields.name.as_deref(), Some("Ibuprofen"));
    }

    #[test]
    fn labels_match_case_insensitively() {
        let fields = extract_fields("medicine: aspirin DOSE: 75 mg");
        assert_eq!(fields.name.as_deref(), Some("aspirin"));
        assert_eq!(fields.dosage.as_deref(), Some("75 mg"));
    }

    #[test]
    fn first_label_occurrence_wins() {
        let fields = extract_fields("Medicine: First\nMedicine: Second");
        assert_eq!(fields.name.as_deref(), Some("First"));
    }

    #[test]
    fn dosage_with_and_without_space_both_extract() {
        let spaced = extract_fields("Dose: 500 mg");
        let glued = extract_fields("Dose: 250mg");
        assert_eq!(spaced.dosage.as_deref(), Some("500 mg"));
        assert_eq!(glued.dosage.as_deref(), Some("250mg"));
    }

    #[test]
    fn dosage_accepts_tablet_units() {
        let fields = extract_fields("Dose: 1 tablet");
        assert_eq!(fields.dosage.as_deref(), Some("1 tablet"));
    }

    #[test]
    fn non_numeric_dosage_is_absent() {
        let fields = extract_fields("Medicine: Ibuprofen Dose: as needed");
        assert_eq!(fields.name.as_deref(), Some("Ibuprofen"));
        assert_eq!(fields.dosage, None);
    }

    #[test]
    fn duration_filler_words_are_stripped() {
        let with_duration = extract_fields("Duration: duration 3 weeks");
        let with_for = extract_fields("Duration: for 10 days");
        assert_eq!(with_duration.duration.as_deref(), Some("3 weeks"));
        assert_eq!(with_for.duration.as_deref(), Some("10 days"));
    }

    #[test]
    fn duration_requires_time_unit() {
        let fields = extract_fields("Duration: until finished");
        assert_eq!(fields.duration, None);
    }

    #[test]
    fn missing_labels_yield_absent_fields() {
        let fields = extract_fields("Medicine: Ibuprofen Dose: 400 mg Frequency: As needed");
        assert_eq!(fields.name.as_deref(), Some("Ibuprofen"));
        assert_eq!(fields.frequency.as_deref(), Some("As needed"));
        assert_eq!(fields.duration, None);
    }

    #[test]
    fn empty_input_yields_all_absent() {
        let fields = extract_fields("");
        assert_eq!(fields.name, None);
        assert_eq!(fields.dosage, None);
        assert_eq!(fields.frequency, None);
        assert_eq!(fields.duration, None);
    }

    #[test]
    fn blank_label_value_is_absent_not_empty() {
        let fields = extract_fields("Medicine:   \nDose: 500 mg");
        assert_eq!(fields.name, None);
        assert_eq!(fields.dosage.as_deref(), Some("500 mg"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let text = "Medicine: Vitamin C Dose: 1 tablet Frequency: once daily Duration: duration 3 weeks";
        assert_eq!(extract_fields(text), extract_fields(text));
    }
}
