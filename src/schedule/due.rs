use chrono::NaiveDateTime;

use super::interval::interval_for;

/// Next-due instant for a medicine: the reference instant plus the interval
/// parsed from its frequency phrase.
///
/// The reference is the creation instant for new records and the taken
/// instant for taken events — not the previous next-due, so the schedule
/// resets from the moment of actual consumption.
pub fn next_due_after(reference: NaiveDateTime, frequency: Option<&str>) -> NaiveDateTime {
    reference + interval_for(frequency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 26)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn advances_reference_by_parsed_interval() {
        assert_eq!(
            next_due_after(reference(), Some("twice daily")),
            reference() + Duration::hours(12)
        );
        assert_eq!(
            next_due_after(reference(), Some("every 8 hours")),
            reference() + Duration::hours(8)
        );
    }

    #[test]
    fn absent_frequency_advances_one_day() {
        assert_eq!(
            next_due_after(reference(), None),
            reference() + Duration::hours(24)
        );
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = next_due_after(reference(), Some("4 times a day"));
        let b = next_due_after(reference(), Some("4 times a day"));
        assert_eq!(a, b);
    }
}
