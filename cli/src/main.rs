use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use community_portal::config::PortalConfig;
use community_portal::records::HistoryKind;
use community_portal::settings::WebhookChannel;
use community_portal::storage::FileStorage;
use community_portal::webhook::{DiscordMessage, WebhookClient, WebhookError};
use community_portal::{ErrorCode, Settings, Store, StoreError};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("storage failed: {0}")]
    Store(#[from] StoreError),
    #[error("webhook failed: {0}")]
    Webhook(#[from] WebhookError),
    #[error("unknown fine `{0}`")]
    UnknownFine(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error_code(),
            Self::Webhook(e) => e.error_code(),
            Self::UnknownFine(_) => "E_UNKNOWN_FINE",
            Self::InvalidJson(_) => "E_JSON",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Store(e) => e.retryable(),
            Self::Webhook(e) => e.retryable(),
            Self::UnknownFine(_) | Self::InvalidJson(_) => false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "portal-cli", about = "Inspect and edit community portal data on disk")]
struct Cli {
    /// Directory holding one JSON file per storage key.
    #[arg(long, env = "PORTAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Settings(SettingsCommand),
    /// Print `allowed` or `denied`; exits non-zero when denied.
    Permission { group: String, page: String },
    Fine(FineCommand),
    /// Print one stored history list.
    History {
        /// leave, delivery, report, fine, house (or the storage key)
        kind: HistoryKind,
    },
    /// Post a plain message to a channel's webhook.
    Notify { channel: WebhookChannel, message: String },
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Show,
    Reset,
    SetWebhook { channel: WebhookChannel, url: String },
}

#[derive(Args, Debug)]
struct FineCommand {
    #[command(subcommand)]
    command: FineSubcommand,
}

#[derive(Subcommand, Debug)]
enum FineSubcommand {
    List,
    Show { name: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            let hint = if e.retryable() { " (retryable)" } else { "" };
            eprintln!("error [{}]: {e}{hint}", e.error_code());
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = PortalConfig::from_env();
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = Store::new(FileStorage::new(data_dir));

    match cli.command {
        Command::Settings(settings) => run_settings(&store, settings).map(|()| ExitCode::SUCCESS),
        Command::Permission { group, page } => Ok(run_permission(&store, &group, &page)),
        Command::Fine(fine) => run_fine(&store, fine).map(|()| ExitCode::SUCCESS),
        Command::History { kind } => print_json(&store.history_json(kind)).map(|()| ExitCode::SUCCESS),
        Command::Notify { channel, message } => {
            let client = WebhookClient::new(config.webhook)?;
            store
                .notify(&client, channel, &DiscordMessage::text(message).into_payload())
                .await?;
            println!("sent");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_settings(store: &Store<FileStorage>, settings: SettingsCommand) -> Result<(), CliError> {
    match settings.command {
        SettingsSubcommand::Show => print_json(&serde_json::to_value(store.settings())?),
        SettingsSubcommand::Reset => {
            store.save_settings(&Settings::default())?;
            info!(dir = %store.storage().dir().display(), "settings reset to defaults");
            println!("reset");
            Ok(())
        }
        SettingsSubcommand::SetWebhook { channel, url } => {
            let mut current = store.settings();
            current.set_webhook_url(channel, url);
            store.save_settings(&current)?;
            println!("{channel} webhook updated");
            Ok(())
        }
    }
}

fn run_permission(store: &Store<FileStorage>, group: &str, page: &str) -> ExitCode {
    if store.check_page_permission(group, page) {
        println!("allowed");
        ExitCode::SUCCESS
    } else {
        println!("denied");
        ExitCode::FAILURE
    }
}

fn run_fine(store: &Store<FileStorage>, fine: FineCommand) -> Result<(), CliError> {
    match fine.command {
        FineSubcommand::List => print_json(&serde_json::to_value(store.fine_list())?),
        FineSubcommand::Show { name } => {
            let details = store.fine_details(&name).ok_or(CliError::UnknownFine(name))?;
            print_json(&serde_json::to_value(details)?)
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
