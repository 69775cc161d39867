//! Change detection and alert classification.
//!
//! Pure decision logic between the feed and the dispatcher: compares
//! fetched snapshots against stored state and decides which changes are
//! worth alerting on.

pub mod classifier;
pub mod detector;

pub use classifier::classify;
pub use detector::{detect_changes, TokenStore};
