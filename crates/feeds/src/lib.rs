//! Market-data feed for trending-token snapshots.
//!
//! Fetches one page of trending tokens from the Birdeye gems API per run.

pub mod birdeye;
pub mod error;

pub use birdeye::BirdeyeClient;
pub use error::FeedError;
