use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

impl SearchHit {
    pub fn new(url: impl Into<String>, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self { url: url.into(), title: title.into(), snippet: snippet.into() }
    }
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// At most `max_results` hits for `query`, best first.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;

    /// Readable text of the page at `url`.
    async fn fetch(&self, url: &str) -> Result<String, SearchError>;
}
