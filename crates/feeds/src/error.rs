//! Error types for feed operations.

use thiserror::Error;

/// Errors that can occur while fetching market data.
///
/// Any of these is fatal to the current run: the pipeline must not
/// proceed to detection or persistence on a failed fetch.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Unexpected response shape: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Shape(err.to_string())
    }
}
