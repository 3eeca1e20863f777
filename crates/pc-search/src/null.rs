use async_trait::async_trait;

use crate::error::SearchError;
use crate::traits::{SearchHit, WebSearch};

/// Finds nothing. Used when no search backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSearch;

#[async_trait]
impl WebSearch for NullSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        Ok(Vec::new())
    }

    async fn fetch(&self, _url: &str) -> Result<String, SearchError> {
        Ok(String::new())
    }
}
