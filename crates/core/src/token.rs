//! Token snapshot and change-record definitions.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One fetched observation of a token's current market state.
/// Produced by the feed once per run, never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// Token symbol (e.g., "SOL", "BONK"). May be empty for unnamed tokens.
    pub symbol: CompactString,
    /// Mint address, unique key within a run.
    pub address: String,
    /// Logo image URL. May be empty.
    pub logo_uri: String,
    /// Current price in USD.
    pub price: f64,
    /// Current pool liquidity in USD.
    pub liquidity: f64,
}

impl TokenSnapshot {
    /// Create a snapshot with the given market values.
    pub fn new(symbol: &str, address: &str, price: f64, liquidity: f64) -> Self {
        Self {
            symbol: CompactString::new(symbol),
            address: address.to_string(),
            logo_uri: String::new(),
            price,
            liquidity,
        }
    }
}

/// Last-persisted state of a token, keyed by unique address.
/// Created on first observation, updated in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    pub symbol: CompactString,
    pub address: String,
    pub logo_uri: String,
    pub price: f64,
    pub liquidity: f64,
    /// When this row was last written.
    pub last_updated: DateTime<Utc>,
}

/// A snapshot paired with its stored counterpart, if any.
///
/// Emitted by the change detector only when the token is unseen or its
/// price/liquidity differs from the stored values; exact matches are
/// dropped before this point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub snapshot: TokenSnapshot,
    /// None when the address has never been observed before.
    pub stored: Option<StoredToken>,
}

impl ChangeRecord {
    /// True when this address has no persisted counterpart.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.stored.is_none()
    }
}

/// Why a token made it past the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    /// First observation of this address.
    NewListing,
    /// Price moved by at least the liquidity-tiered threshold.
    /// Carries the signed percent change against the stored price.
    PriceMove { percent_change: f64 },
}

/// An alert-worthy token, consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertableToken {
    pub snapshot: TokenSnapshot,
    pub kind: AlertKind,
}

impl AlertableToken {
    #[inline]
    pub fn is_new(&self) -> bool {
        matches!(self.kind, AlertKind::NewListing)
    }
}
