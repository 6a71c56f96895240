//! Homework bot CLI
//!
//! Command-line entry point for the review status notifier.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Polls the homework review API and relays status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds to wait between polls (overrides config file)
    #[arg(long)]
    retry_time: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_time={:?}, log_level={:?}",
        args.config,
        args.retry_time,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();

    if let Some(retry_time) = args.retry_time {
        config.practicum.retry_time_seconds = retry_time;
    }

    tracing::info!("Starting homework bot");

    if let Err(e) = homework_bot::run(config).await {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}
