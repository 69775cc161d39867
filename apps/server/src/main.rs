//! Trendwatch - trending-token alert bot.
//!
//! Polls the Birdeye gems feed for trending Solana tokens and alerts
//! subscribed Telegram chats on significant price moves.

mod config;
mod pipeline;

use clap::{Parser, Subcommand};
use config::AppConfig;
use std::sync::Arc;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;
use trendwatch_alerts::TelegramBot;
use trendwatch_store::Database;

/// Trendwatch CLI
#[derive(Parser, Debug)]
#[command(name = "trendwatch")]
#[command(about = "Trending-token price alert bot", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one scan: fetch, detect changes, persist, send alerts
    Scan,
    /// Run the Telegram command bot (subscribe/unsubscribe)
    Listen,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn telegram_token() -> Result<String, std::env::VarError> {
    std::env::var("TELEGRAM_BOT_TOKEN")
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load(&args.config);

    let db = Database::connect(&config.database_url).await?;
    let token = telegram_token()
        .map_err(|_| "TELEGRAM_BOT_TOKEN environment variable is not set")?;
    let bot = TelegramBot::new(&token, db.clone());

    match args.command {
        Command::Scan => pipeline::run_scan(&db, &bot).await?,
        Command::Listen => Arc::new(bot).run().await,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(err) = run(args).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
