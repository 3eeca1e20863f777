//! Google Custom Search JSON API backend.

use async_trait::async_trait;
use pc_core::config::SearchConfig;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::SearchError;
use crate::html::html_to_text;
use crate::traits::{SearchHit, WebSearch};

/// The API never returns more than ten items per page.
const MAX_PAGE_SIZE: usize = 10;

#[derive(Clone)]
pub struct GoogleSearch {
    client: Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearch {
    pub fn new(config: &SearchConfig, timeout: Duration) -> Result<Self, SearchError> {
        if !config.is_configured() {
            return Err(SearchError::NotConfigured);
        }
        let (Some(api_key), Some(engine_id)) = (config.api_key.clone(), config.engine_id.clone()) else {
            return Err(SearchError::NotConfigured);
        };
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pc-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Transport(format!("building search client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            engine_id,
        })
    }
}

#[async_trait]
impl WebSearch for GoogleSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let num = max_results.clamp(1, MAX_PAGE_SIZE).to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body: Value = resp
            .json()
            .await
            .map_err(|e| SearchError::Malformed(e.to_string()))?;
        let hits = parse_search_response(&body, max_results)?;
        debug!(hits = hits.len(), "search completed");
        Ok(hits)
    }

    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let is_html = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(true, |ct| ct.contains("html"));
        let body = resp.text().await?;
        Ok(if is_html { html_to_text(&body) } else { body })
    }
}

/// Hits from a Custom Search response body. A body without `items` means no results.
pub fn parse_search_response(body: &Value, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
    if let Some(err) = body.get("error") {
        let message = err.get("message").and_then(Value::as_str).unwrap_or("unknown error");
        return Err(SearchError::Malformed(format!("api error: {message}")));
    }
    let Some(items) = body.get("items") else {
        return Ok(Vec::new());
    };
    let items = items
        .as_array()
        .ok_or_else(|| SearchError::Malformed("`items` is not an array".into()))?;

    let mut hits = Vec::new();
    for item in items.iter().take(max_results) {
        let Some(url) = item.get("link").and_then(Value::as_str) else {
            return Err(SearchError::Malformed("search item without `link`".into()));
        };
        let text = |key: &str| item.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        hits.push(SearchHit {
            url: url.to_string(),
            title: text("title"),
            snippet: text("snippet"),
        });
    }
    Ok(hits)
}
