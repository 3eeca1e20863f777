use pc_core::error::PcError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Search API credentials are not configured")]
    NotConfigured,
    #[error("Request timed out")]
    Timeout,
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if let Some(status) = err.status() {
            SearchError::Status(status.as_u16())
        } else if err.is_decode() {
            SearchError::Malformed(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

impl From<SearchError> for PcError {
    fn from(err: SearchError) -> Self {
        PcError::Collaborator(err.to_string())
    }
}
