#![forbid(unsafe_code)]

//! `communicator`: inspect and dispatch Company Communicator notifications.
//!
//! Loads configuration, opens the notification store and prints the
//! confirmation, status and listing views as text or JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use company_communicator::config::GlobalConfig;
use company_communicator::dialog::{DialogResult, LocalDialog, TaskDialog};
use company_communicator::models::notification::{MessageTab, NotificationRecord};
use company_communicator::persistence::db;
use company_communicator::persistence::notification_repo::NotificationRepo;
use company_communicator::persistence::source::RecordSource;
use company_communicator::views::{ConfirmationView, ListingRow, StatusView};
use company_communicator::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Listing tab selectable on the command line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum TabArg {
    Drafts,
    Scheduled,
    Sent,
}

impl From<TabArg> for MessageTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Drafts => Self::Drafts,
            TabArg::Scheduled => Self::Scheduled,
            TabArg::Sent => Self::Sent,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "communicator", about = "Company Communicator notification tool", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the database path from the configuration.
    #[arg(long)]
    database: Option<String>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Print views as JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the delivery status of a notification.
    Status {
        /// Notification ID.
        id: String,
    },

    /// Show the send confirmation for a draft, optionally dispatching it.
    Confirm {
        /// Notification ID.
        id: String,
        /// Dispatch the draft after showing the confirmation.
        #[arg(long)]
        send: bool,
        /// Expected recipient count recorded at dispatch.
        #[arg(long, default_value_t = 0)]
        recipients: u32,
    },

    /// List notifications under a tab.
    List {
        /// Tab to list.
        #[arg(long, value_enum, default_value_t = TabArg::Drafts)]
        tab: TabArg,
        /// Case-insensitive title filter.
        #[arg(long)]
        search: Option<String>,
    },

    /// Import a notification record from a JSON file.
    Import {
        /// Path to the JSON record.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GlobalConfig::load_from_path(path)?,
        None => GlobalConfig::default(),
    };
    if let Some(database) = args.database {
        config.database_path = database;
    }
    info!(database = %config.database_path, "configuration loaded");

    let pool = db::connect(&config.database_path).await?;
    let repo = NotificationRepo::new(Arc::new(pool));

    match args.command {
        Command::Status { id } => {
            let record = repo.fetch_record(&id).await?;
            emit(&StatusView::build(&record, &config.display), args.json)?;
        }
        Command::Confirm {
            id,
            send,
            recipients,
        } => {
            let record = repo.fetch_record(&id).await?;
            emit(&ConfirmationView::build(&record, &config.display), args.json)?;
            if send {
                dispatch(&repo, &record, recipients).await?;
            }
        }
        Command::List { tab, search } => {
            let records = repo.list_by_tab(tab.into(), search.as_deref()).await?;
            let rows: Vec<ListingRow> = records
                .iter()
                .map(|record| ListingRow::from_record(record, &config.display))
                .collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No messages.");
            } else {
                for row in rows {
                    println!("{row}");
                }
            }
        }
        Command::Import { file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let record: NotificationRecord = serde_json::from_str(&raw)?;
            let created = repo.create(&record).await?;
            info!(id = %created.id, "notification imported");
            println!("{}", created.id);
        }
    }

    Ok(())
}

/// Dispatch a draft and close the confirmation dialog with the outcome.
async fn dispatch(repo: &NotificationRepo, record: &NotificationRecord, recipients: u32) -> Result<()> {
    let dialog = LocalDialog::new();
    dialog.on_close(Box::new(|result: &DialogResult| match result {
        DialogResult::Submitted { notification_id } => {
            info!(%notification_id, "confirmation dialog submitted");
        }
        DialogResult::Cancelled => warn!("confirmation dialog cancelled"),
    }));

    match repo.mark_sending_started(&record.id, recipients).await {
        Ok(started) => {
            dialog.close(DialogResult::Submitted {
                notification_id: started.id,
            });
            Ok(())
        }
        Err(err) => {
            dialog.close(DialogResult::Cancelled);
            Err(err)
        }
    }
}

fn emit<T: Serialize + std::fmt::Display>(view: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
