//! SQLite database for subscribers and token state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;
use trendwatch_core::{ChangeRecord, StoredToken, Subscriber};
use trendwatch_engine::TokenStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Database handle shared across the pipeline.
///
/// Constructed once per process and passed down explicitly; holds a small
/// connection pool with no global state.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at the given URL and apply migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                chat_id INTEGER PRIMARY KEY
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tokens (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL DEFAULT '',
                address TEXT NOT NULL UNIQUE,
                logo TEXT NOT NULL DEFAULT '',
                price REAL NOT NULL DEFAULT 0,
                liquidity REAL NOT NULL DEFAULT 0,
                last_updated DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All subscribed chats.
    pub async fn subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        let rows = sqlx::query_as::<_, (i64,)>("SELECT chat_id FROM users ORDER BY chat_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(chat_id,)| Subscriber::new(chat_id)).collect())
    }

    /// Register a chat for alerts. Returns false if it was already present.
    pub async fn add_subscriber(&self, chat_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("INSERT OR IGNORE INTO users (chat_id) VALUES (?)")
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a chat from the subscriber set. Returns false if it was not
    /// subscribed in the first place.
    pub async fn remove_subscriber(&self, chat_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE chat_id = ?")
            .bind(chat_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Look up the stored row for a token address.
    pub async fn token_by_address(
        &self,
        address: &str,
    ) -> Result<Option<StoredToken>, StoreError> {
        let row = sqlx::query_as::<_, (String, String, String, f64, f64, DateTime<Utc>)>(
            "SELECT symbol, address, logo, price, liquidity, last_updated FROM tokens WHERE address = ?",
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(
            |(symbol, address, logo, price, liquidity, last_updated)| StoredToken {
                symbol: symbol.into(),
                address,
                logo_uri: logo,
                price,
                liquidity,
                last_updated,
            },
        ))
    }

    /// Upsert every change record by unique address, in one transaction.
    ///
    /// New addresses get a full row; existing rows only have price,
    /// liquidity, and last_updated rewritten, keeping the originally
    /// observed symbol and logo. Runs for all change records, alert-worthy
    /// or not, so storage always reflects the latest observed values.
    pub async fn persist_changes(&self, records: &[ChangeRecord]) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for record in records {
            let snapshot = &record.snapshot;
            sqlx::query(
                r#"
                INSERT INTO tokens (symbol, address, logo, price, liquidity, last_updated)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT(address) DO UPDATE SET
                    price = excluded.price,
                    liquidity = excluded.liquidity,
                    last_updated = excluded.last_updated
                "#,
            )
            .bind(snapshot.symbol.as_str())
            .bind(&snapshot.address)
            .bind(&snapshot.logo_uri)
            .bind(snapshot.price)
            .bind(snapshot.liquidity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if record.is_new() {
                info!("New token inserted: {}", snapshot.address);
            } else {
                info!("Token updated: {}", snapshot.address);
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for Database {
    type Error = StoreError;

    async fn get_token(&self, address: &str) -> Result<Option<StoredToken>, StoreError> {
        self.token_by_address(address).await
    }
}
