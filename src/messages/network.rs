//! Network messages - communication between App and Network layers

use crate::error::FetchError;
use crate::models::{Friend, Language, Repository};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Search the most starred repositories for a language
    FetchPopularRepos { id: u64, language: Language },
    /// Fetch the bulk friends list
    FetchFriends { id: u64 },
    /// Cancel a pending fetch; its settlement becomes `Cancelled`
    Cancel { id: u64, reason: String },
    /// Shutdown the network actor
    Shutdown,
}

/// Settlements sent from Network layer to App layer
#[derive(Debug)]
pub enum NetworkResponse {
    Repositories { id: u64, repos: Vec<Repository> },
    Friends { id: u64, friends: Vec<Friend> },
    /// The fetch was superseded before it settled
    Cancelled { id: u64, reason: String },
    /// Any failure other than cancellation
    Failed { id: u64, error: FetchError },
}

impl NetworkResponse {
    /// Get the fetch ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Repositories { id, .. } => *id,
            NetworkResponse::Friends { id, .. } => *id,
            NetworkResponse::Cancelled { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    /// Wrap a failed settlement, keeping cancellation distinct
    pub fn from_error(id: u64, error: FetchError) -> Self {
        match error {
            FetchError::Cancelled(reason) => NetworkResponse::Cancelled { id, reason },
            error => NetworkResponse::Failed { id, error },
        }
    }
}
