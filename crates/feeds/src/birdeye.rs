//! Birdeye gems REST client.
//!
//! Fetches the top trending tokens for one chain in a single POST call.

use crate::error::FeedError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use trendwatch_core::TokenSnapshot;

const GEMS_URL: &str = "https://multichain-api.birdeye.so/solana/v3/gems";
/// Provider has no documented response-time bound; cap requests ourselves.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Page size for one run. The provider caps trending at 100 entries.
const PAGE_LIMIT: u32 = 100;

/// Request body for the gems endpoint.
#[derive(Debug, Serialize)]
struct GemsRequest {
    limit: u32,
    offset: u32,
    filters: Vec<String>,
    shown_time_frame: &'static str,
    #[serde(rename = "type")]
    list_type: &'static str,
    sort_by: &'static str,
    sort_type: &'static str,
}

impl GemsRequest {
    /// First 100 trending entries over a 24h window, rank ascending.
    fn trending_page() -> Self {
        Self {
            limit: PAGE_LIMIT,
            offset: 0,
            filters: Vec::new(),
            shown_time_frame: "24h",
            list_type: "trending",
            sort_by: "rank",
            sort_type: "asc",
        }
    }
}

#[derive(Debug, Deserialize)]
struct GemsResponse {
    data: GemsData,
}

#[derive(Debug, Deserialize)]
struct GemsData {
    items: Vec<GemsItem>,
}

/// One token entry as the provider ships it. Every field is optional on
/// the wire; text fields default to empty and numeric fields to 0.0.
#[derive(Debug, Deserialize)]
struct GemsItem {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    address: String,
    #[serde(rename = "logoURI", default)]
    logo_uri: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    liquidity: f64,
}

impl From<GemsItem> for TokenSnapshot {
    fn from(item: GemsItem) -> Self {
        TokenSnapshot {
            symbol: item.symbol.into(),
            address: item.address,
            logo_uri: item.logo_uri,
            price: item.price,
            liquidity: item.liquidity,
        }
    }
}

/// Client for the Birdeye gems endpoint.
pub struct BirdeyeClient {
    http: reqwest::Client,
    url: String,
}

impl BirdeyeClient {
    /// Build a client with the default endpoint and request timeout.
    pub fn new() -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: GEMS_URL.to_string(),
        })
    }

    /// Override the endpoint URL. Used by tests against a local server.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Fetch the current trending page as token snapshots.
    ///
    /// One POST per invocation; any transport failure, non-success status,
    /// or unrecognized body shape is returned as an error with no partial
    /// results.
    pub async fn fetch_trending(&self) -> Result<Vec<TokenSnapshot>, FeedError> {
        let response = self
            .http
            .post(&self.url)
            .header("origin", "https://birdeye.so")
            .header("referer", "https://birdeye.so/")
            .json(&GemsRequest::trending_page())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let snapshots = parse_gems(&body)?;
        debug!("Fetched {} trending token snapshots", snapshots.len());
        Ok(snapshots)
    }
}

/// Parse a gems response body, preserving provider order.
fn parse_gems(body: &str) -> Result<Vec<TokenSnapshot>, FeedError> {
    let response: GemsResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .items
        .into_iter()
        .map(TokenSnapshot::from)
        .collect())
}
