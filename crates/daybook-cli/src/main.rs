use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::warn;

use daybook_core::clock::SystemClock;
use daybook_core::credentials::CredentialStore;
use daybook_core::export::format_entry;
use daybook_core::feedback::{DisabledFeedback, FeedbackClient};
use daybook_core::service::EntryService;
use daybook_db::Database;
use daybook_feedback::HttpFeedbackClient;

#[derive(Parser)]
#[command(name = "daybook", version, about = "Personal journal with optional AI feedback")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Check credentials
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Write today's entry
    Write {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        mood: String,
        #[arg(long)]
        gratitude: String,
        #[arg(long = "growth")]
        room_for_growth: String,
        #[arg(long)]
        thoughts: String,
        /// Ask the feedback service to comment on the entry
        #[arg(long)]
        feedback: bool,
    },
    /// List saved entries
    List {
        #[arg(long)]
        username: String,
        /// Restrict to one day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daybook=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Config
    let db_path = env::var("DAYBOOK_DB_PATH").unwrap_or_else(|_| "daybook.db".into());
    let export_dir = PathBuf::from(env::var("DAYBOOK_EXPORT_DIR").unwrap_or_else(|_| ".".into()));

    let db = Arc::new(Database::open(Path::new(&db_path))?);
    let credentials = CredentialStore::new(db.clone());

    match cli.command {
        Command::Register { username, password } => {
            credentials.create_user(&username, &password)?;
            println!("Registered {username}.");
        }
        Command::Login { username, password } => {
            let user = credentials.login(&username, &password)?;
            println!(
                "Logged in as {} (member since {}).",
                user.username,
                user.created_at.format("%Y-%m-%d")
            );
        }
        Command::Write {
            username,
            password,
            mood,
            gratitude,
            room_for_growth,
            thoughts,
            feedback,
        } => {
            credentials.login(&username, &password)?;

            let service = EntryService::new(
                db,
                feedback_client_from_env(),
                Arc::new(SystemClock),
                export_dir,
            );
            let submission =
                service.submit(&username, &mood, &gratitude, &room_for_growth, &thoughts, feedback)?;

            println!(
                "Saved entry #{} for {}.",
                submission.entry.id, submission.entry.entry_date
            );
            if let Some(text) = &submission.entry.ai_feedback {
                println!("\nAI Feedback:\n{text}");
            } else if let Some(err) = &submission.feedback_error {
                println!("Feedback was unavailable: {err}");
            }
            if let Some(path) = &submission.export_path {
                println!("Exported to {}.", path.display());
            }
        }
        Command::List { username, date } => {
            let service = EntryService::new(
                db,
                Arc::new(DisabledFeedback),
                Arc::new(SystemClock),
                export_dir,
            );

            let entries = match date {
                Some(date) => {
                    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                        .context("--date must be YYYY-MM-DD")?;
                    service.entries_for_date(&username, date)?
                }
                None => service.entries_for(&username)?,
            };

            if entries.is_empty() {
                println!("No entries for {username}.");
            }
            for entry in &entries {
                println!("{}", format_entry(entry));
            }
        }
    }

    Ok(())
}

/// Build the feedback client from the environment; installations without
/// an API key get the disabled stand-in.
fn feedback_client_from_env() -> Arc<dyn FeedbackClient> {
    match env::var("DAYBOOK_FEEDBACK_API_KEY") {
        Ok(key) if !key.is_empty() => {
            let base_url = env::var("DAYBOOK_FEEDBACK_URL")
                .unwrap_or_else(|_| daybook_feedback::DEFAULT_BASE_URL.into());
            let model = env::var("DAYBOOK_FEEDBACK_MODEL")
                .unwrap_or_else(|_| daybook_feedback::DEFAULT_MODEL.into());

            match HttpFeedbackClient::new(base_url, key, model) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    warn!("feedback client unavailable: {err}");
                    Arc::new(DisabledFeedback)
                }
            }
        }
        _ => Arc::new(DisabledFeedback),
    }
}
