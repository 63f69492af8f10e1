use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Structured output of the field extractor.
///
/// Each field is either a non-empty trimmed string or `None` — never
/// `Some("")`. Missing fields are a normal result, not an error; only a
/// missing name blocks persistence. Any user-facing "unknown" placeholder
/// belongs to the presentation boundary, not to this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineFields {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
}

impl MedicineFields {
    /// A record may only be persisted when a non-blank name was extracted.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// A persisted medicine record, owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub id: i64,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub start_date: NaiveDate,
    /// Absent until the first reminder fires.
    pub last_taken: Option<NaiveDateTime>,
    pub next_due: NaiveDateTime,
}

/// Projection returned by due-window queries — just what the reminder
/// loop needs to fire and reschedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueMedicine {
    pub id: i64,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub next_due: NaiveDateTime,
}

/// Payload handed to the notification boundary when a dose comes due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
}

impl From<&DueMedicine> for Reminder {
    fn from(due: &DueMedicine) -> Self {
        Self {
            name: due.name.clone(),
            dosage: due.dosage.clone(),
            frequency: due.frequency.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_name_requires_non_blank() {
        let mut fields = MedicineFields {
            name: Some("Paracetamol".into()),
            dosage: None,
            frequency: None,
            duration: None,
        };
        assert!(fields.has_name());

        fields.name = Some("   ".into());
        assert!(!fields.has_name());

        fields.name = None;
        assert!(!fields.has_name());
    }

    #[test]
    fn reminder_carries_due_fields() {
        let due = DueMedicine {
            id: 7,
            name: "Amoxicillin".into(),
            dosage: Some("250mg".into()),
            frequency: Some("every 8 hours".into()),
            next_due: NaiveDate::from_ymd_opt(2026, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        let reminder = Reminder::from(&due);
        assert_eq!(reminder.name, "Amoxicillin");
        assert_eq!(reminder.dosage.as_deref(), Some("250mg"));
        assert_eq!(reminder.frequency.as_deref(), Some("every 8 hours"));
    }
}
