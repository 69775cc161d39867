//! Single scan run: fetch, detect, classify, persist, dispatch.

use std::time::Instant;
use thiserror::Error;
use tracing::info;
use trendwatch_alerts::{Dispatcher, TelegramBot};
use trendwatch_engine::{classify, detect_changes};
use trendwatch_feeds::{BirdeyeClient, FeedError};
use trendwatch_store::{Database, StoreError};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Market data fetch failed: {0}")]
    Feed(#[from] FeedError),
    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Run the pipeline once.
///
/// A fetch or detection failure aborts before anything is written or sent.
/// Classification runs before the upsert, so alert percent changes are
/// always measured against the values read at detection time; the new
/// snapshot is persisted for every change record, alert-worthy or not.
pub async fn run_scan(db: &Database, bot: &TelegramBot) -> Result<(), ScanError> {
    let started = Instant::now();
    info!("Starting trending-token scan");

    let snapshots = BirdeyeClient::new()?.fetch_trending().await?;
    let changes = detect_changes(snapshots, db).await?;
    let alert_worthy = classify(&changes);

    let subscribers = db.subscribers().await?;
    db.persist_changes(&changes).await?;

    Dispatcher::new()
        .dispatch(bot, &alert_worthy, &subscribers)
        .await;

    info!(
        "Scan finished in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
