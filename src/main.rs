//! Posolog binary — ingest prescription text, run the reminder service,
//! list records.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use posolog::config::{self, ServiceConfig};
use posolog::ingest::{ingest_text, IngestError};
use posolog::reminder::{start_reminder_service, LogSink};
use posolog::schedule::{format_timestamp, local_now};
use posolog::store::{MedicineStore, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "posolog", version, about = "Prescription dosing schedule and reminder engine", long_about = None)]
struct Cli {
    /// Path to the medicine database (defaults to ~/Posolog/posolog.db).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest a raw prescription text file (OCR output) as a medicine record.
    Ingest {
        /// File containing the raw text blob.
        file: PathBuf,
    },
    /// Run the reminder service until Ctrl-C.
    Serve {
        /// Seconds between polls for due medicines.
        #[arg(long, default_value_t = 30)]
        poll_secs: u64,
        /// Forward window in seconds within which a dose counts as due.
        #[arg(long, default_value_t = 60)]
        horizon_secs: i64,
    },
    /// List all medicine records.
    List {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "posolog failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = cli.db.unwrap_or_else(config::default_db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteStore::open(&db_path)?;

    match cli.command {
        Commands::Ingest { file } => {
            let text = std::fs::read_to_string(&file)?;
            match ingest_text(&store, &text, local_now()) {
                Ok(outcome) => {
                    println!("Recorded medicine #{}:", outcome.id);
                    println!("  name:      {}", outcome.fields.name.as_deref().unwrap_or("unknown"));
                    println!("  dosage:    {}", outcome.fields.dosage.as_deref().unwrap_or("unknown"));
                    println!("  frequency: {}", outcome.fields.frequency.as_deref().unwrap_or("unknown"));
                    println!("  duration:  {}", outcome.fields.duration.as_deref().unwrap_or("unknown"));
                    println!("  next due:  {}", format_timestamp(outcome.next_due));
                }
                Err(IngestError::NameMissing) => {
                    eprintln!("Could not extract a medicine name from the text. No record created.");
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Serve { poll_secs, horizon_secs } => {
            let service_config = ServiceConfig {
                poll_period: std::time::Duration::from_secs(poll_secs),
                horizon: chrono::Duration::seconds(horizon_secs),
                ..ServiceConfig::default()
            };
            tracing::info!("{} v{} reminder service", config::APP_NAME, config::APP_VERSION);
            let handle = start_reminder_service(store, LogSink, service_config);
            tokio::signal::ctrl_c().await?;
            tracing::info!("stop requested");
            handle.shutdown();
            drop(handle); // joins the service thread
        }
        Commands::List { json } => {
            let records = store.fetch_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No medicine records.");
            } else {
                for r in &records {
                    println!(
                        "{:>4}  {:<24} {:<12} {:<16} due {}",
                        r.id,
                        r.name,
                        r.dosage.as_deref().unwrap_or("unknown"),
                        r.frequency.as_deref().unwrap_or("unknown"),
                        format_timestamp(r.next_due),
                    );
                }
            }
        }
    }
    Ok(())
}
