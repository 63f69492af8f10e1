use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Posolog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when RUST_LOG is not set
pub fn default_log_filter() -> String {
    "posolog=info".to_string()
}

/// Get the application data directory
/// ~/Posolog/ on all platforms (user-visible, next to the user's documents)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Posolog")
}

/// Default location of the medicine database
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("posolog.db")
}

/// Tuning for the reminder service loop.
///
/// Passed explicitly into [`crate::reminder::start_reminder_service`] —
/// there is no process-wide default the loop reads on its own.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Sleep between successful poll iterations.
    pub poll_period: Duration,
    /// Forward window within which a record counts as due.
    pub horizon: chrono::Duration,
    /// Sleep after a failed poll iteration before retrying.
    pub error_backoff: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            poll_period: Duration::from_secs(30),
            horizon: chrono::Duration::seconds(60),
            error_backoff: Duration::from_secs(60),
        }
    }
}
