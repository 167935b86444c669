//! Remote race data sources.

pub mod openf1;

use thiserror::Error;

/// Failures while talking to a race data API.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    #[error("background fetch failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
