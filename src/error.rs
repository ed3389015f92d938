use std::time::Duration;

use thiserror::Error;

/// Ways a fetch can settle other than with data
#[derive(Error, Debug)]
pub enum FetchError {
    /// Superseded by a newer fetch. Expected; callers log and discard it.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The task driving the fetch went away without reporting
    #[error("Fetch task aborted")]
    Aborted,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled(_))
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
