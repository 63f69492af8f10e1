//! Due tracking and reminder delivery.

pub mod service;

pub use service::{start_reminder_service, ReminderServiceHandle};

use thiserror::Error;

use crate::models::Reminder;

#[derive(Error, Debug)]
#[error("reminder delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Notification boundary. Receives one payload per fired reminder; the
/// transport behind it (pop-up, sound, push) is not this crate's concern.
pub trait ReminderSink: Send {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError>;
}

/// Sink that writes reminders to the log. Stands in for a real
/// notification transport.
pub struct LogSink;

impl ReminderSink for LogSink {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError> {
        tracing::info!(
            medicine = %reminder.name,
            dosage = reminder.dosage.as_deref().unwrap_or("unknown"),
            frequency = reminder.frequency.as_deref().unwrap_or("unknown"),
            "time to take your medicine"
        );
        Ok(())
    }
}
