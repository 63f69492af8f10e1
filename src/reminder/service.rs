//! Background reminder loop — polls the store for due medicines.
//!
//! One thread, one in-flight iteration at a time: every poll fully
//! completes, including schedule advancement for each fired record, before
//! the next sleep begins. A failed iteration is logged and the loop backs
//! off to the configured longer wait instead of terminating; only the
//! shutdown flag stops it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::models::Reminder;
use crate::reminder::ReminderSink;
use crate::schedule::{format_timestamp, local_now, next_due_after};
use crate::store::{MedicineStore, StoreError};

/// Sleep granularity so shutdown interrupts a sleep within a fraction
/// of a second.
const SLEEP_GRANULARITY: Duration = Duration::from_millis(250);

/// Handle for the reminder service thread.
///
/// Supports graceful shutdown via `shutdown()` or automatic cleanup on
/// `Drop`, which joins the thread.
pub struct ReminderServiceHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl ReminderServiceHandle {
    /// Request graceful shutdown. The in-flight iteration (if any) will
    /// complete, but no further polls are started.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

impl Drop for ReminderServiceHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

/// Start the reminder loop on a background thread.
///
/// The store moves into the loop; a second service instance would need its
/// own store connection and coordination through the store's atomic updates
/// to avoid double-firing the same record.
pub fn start_reminder_service<S, K>(
    store: S,
    sink: K,
    config: ServiceConfig,
) -> ReminderServiceHandle
where
    S: MedicineStore + Send + 'static,
    K: ReminderSink + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();

    let handle = std::thread::spawn(move || {
        tracing::info!(
            poll_secs = config.poll_period.as_secs(),
            horizon_secs = config.horizon.num_seconds(),
            "reminder service started"
        );
        service_loop(&store, &sink, &config, &flag);
    });

    ReminderServiceHandle {
        shutdown,
        handle: Some(handle),
    }
}

fn service_loop<S: MedicineStore, K: ReminderSink>(
    store: &S,
    sink: &K,
    config: &ServiceConfig,
    shutdown: &AtomicBool,
) {
    while !shutdown.load(Ordering::Relaxed) {
        let wait = match run_iteration(store, sink, config) {
            Ok(fired) => {
                if fired > 0 {
                    tracing::debug!(fired, "poll iteration fired reminders");
                }
                config.poll_period
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    backoff_secs = config.error_backoff.as_secs(),
                    "poll iteration failed, backing off"
                );
                config.error_backoff
            }
        };
        sleep_with_shutdown(wait, shutdown);
    }
    tracing::info!("reminder service shutting down");
}

/// One poll: fetch everything due within the horizon, deliver a reminder
/// for each, and advance its schedule from the current instant.
///
/// Marking the dose taken right after delivery is a deliberate placeholder
/// for a user-driven "taken" action; replace it here, keeping
/// `fetch_due_within`/`mark_taken` as the seam. A delivery failure is
/// logged but the dose still counts as administered for scheduling.
pub fn run_iteration<S: MedicineStore, K: ReminderSink>(
    store: &S,
    sink: &K,
    config: &ServiceConfig,
) -> Result<usize, StoreError> {
    let now = local_now();
    // A record overdue from an earlier run (service stopped past its due
    // instant) is still due, so the window opens at the epoch floor, not
    // at `now`.
    let due = store.fetch_due_within(chrono::NaiveDateTime::UNIX_EPOCH, now + config.horizon)?;
    let fired = due.len();

    for med in due {
        let reminder = Reminder::from(&med);
        if let Err(e) = sink.deliver(&reminder) {
            tracing::warn!(
                id = med.id,
                medicine = %med.name,
                error = %e,
                "reminder delivery failed, dose still marked taken"
            );
        }

        let taken_at = local_now();
        let next_due = next_due_after(taken_at, med.frequency.as_deref());
        store.mark_taken(med.id, taken_at, next_due)?;
        tracing::info!(
            id = med.id,
            medicine = %med.name,
            next_due = %format_timestamp(next_due),
            "dose recorded, schedule advanced"
        );
    }

    Ok(fired)
}

fn sleep_with_shutdown(total: Duration, shutdown: &AtomicBool) {
    let mut remaining = total;
    while !remaining.is_zero() {
        if shutdown.load(Ordering::Relaxed) {
            return;
        }
        let step = remaining.min(SLEEP_GRANULARITY);
        std::thread::sleep(step);
        remaining -= step;
    }
}
