//! Snapshot-vs-stored change detection.

use async_trait::async_trait;
use tracing::info;
use trendwatch_core::{ChangeRecord, StoredToken, TokenSnapshot};

/// Read access to persisted token state, keyed by address.
///
/// Injected into the detector so the pipeline can run against any storage
/// backend, including in-memory stubs in tests.
#[async_trait]
pub trait TokenStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up the stored row for an address, if one exists.
    async fn get_token(&self, address: &str) -> Result<Option<StoredToken>, Self::Error>;
}

/// Compare fetched snapshots against stored state.
///
/// Issues exactly one lookup per snapshot, in input order. A snapshot with
/// no stored counterpart is emitted as new; one with a counterpart is
/// emitted only when price or liquidity differs exactly. Unchanged rows
/// are dropped. Output preserves input order.
///
/// One query per row is fine at the current page size (<= 100); a single
/// `WHERE address IN (...)` read is the reshape if that ever grows.
pub async fn detect_changes<S>(
    snapshots: Vec<TokenSnapshot>,
    store: &S,
) -> Result<Vec<ChangeRecord>, S::Error>
where
    S: TokenStore + Sync,
{
    let mut changes = Vec::new();

    for snapshot in snapshots {
        match store.get_token(&snapshot.address).await? {
            None => changes.push(ChangeRecord {
                snapshot,
                stored: None,
            }),
            Some(stored) => {
                if snapshot.price != stored.price || snapshot.liquidity != stored.liquidity {
                    changes.push(ChangeRecord {
                        snapshot,
                        stored: Some(stored),
                    });
                }
            }
        }
    }

    info!("Found {} new or changed tokens", changes.len());
    Ok(changes)
}
