// src/main.rs
use clap::Parser;
use dotenvy::dotenv;
use financial_storyteller::config::AppConfig;
use financial_storyteller::database::db::LocalStorage;
use financial_storyteller::{cli, logging};
use tracing::info;

/// Financial Storyteller: track spending and goals as a story, in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Route to open first, e.g. /dashboard or /expense-entry-and-management.
    #[arg(long, default_value = "/login")]
    route: String,

    /// SQLite URL for local storage; overrides STORYTELLER_STORAGE_URL.
    #[arg(long)]
    storage: Option<String>,

    /// Multiplier for simulated API delays (0 disables them).
    #[arg(long)]
    latency_scale: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(url) = args.storage {
        config = config.with_storage_url(url);
    }
    if let Some(scale) = args.latency_scale {
        config.latency_scale = scale.max(0.0);
    }
    logging::init(&config)?;
    info!(storage = %config.storage_url, route = %args.route, "starting");

    let storage = LocalStorage::open(&config.storage_url).await?;
    cli::run(&config, storage, &args.route).await
}
