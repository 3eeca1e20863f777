use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::error::{PcError, Result};

pub const GOOGLE_CUSTOM_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub checker: CheckerConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Tuning knobs of one checker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// A paragraph pair counts as a match when its score is strictly above this.
    pub similarity_threshold: f64,
    /// Percentage a corpus document's average match score must exceed to be reported.
    pub reporting_threshold: f64,
    pub max_paragraphs: usize,
    /// Paragraphs shorter than this (in chars) are never searched online.
    pub min_online_paragraph_chars: usize,
    pub max_search_results: usize,
    pub max_query_chars: usize,
    pub search_timeout_secs: u64,
    pub online_concurrency: usize,
    /// Treat very frequent characters of long inputs as junk while matching.
    pub autojunk: bool,
}

impl CheckerConfig {
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(PcError::Config(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.reporting_threshold) {
            return Err(PcError::Config(format!(
                "reporting_threshold must be within [0, 100], got {}",
                self.reporting_threshold
            )));
        }
        if self.max_paragraphs == 0 {
            return Err(PcError::Config("max_paragraphs must be positive".into()));
        }
        if self.max_search_results == 0 {
            return Err(PcError::Config("max_search_results must be positive".into()));
        }
        if self.online_concurrency == 0 {
            return Err(PcError::Config("online_concurrency must be positive".into()));
        }
        Ok(())
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
            reporting_threshold: 70.0,
            max_paragraphs: 20,
            min_online_paragraph_chars: 50,
            max_search_results: 5,
            max_query_chars: 1000,
            search_timeout_secs: 10,
            online_concurrency: 4,
            autojunk: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
}

impl SearchConfig {
    /// Both credentials are present and non-blank.
    pub fn is_configured(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.api_key) && filled(&self.engine_id)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: GOOGLE_CUSTOM_SEARCH_ENDPOINT.into(),
            api_key: None,
            engine_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `PC_*` / `GOOGLE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        let checker = &mut cfg.checker;

        if let Some(v) = parse_var(&lookup, "PC_SIMILARITY_THRESHOLD")? {
            checker.similarity_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "PC_REPORTING_THRESHOLD")? {
            checker.reporting_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "PC_MAX_PARAGRAPHS")? {
            checker.max_paragraphs = v;
        }
        if let Some(v) = parse_var(&lookup, "PC_MIN_ONLINE_CHARS")? {
            checker.min_online_paragraph_chars = v;
        }
        if let Some(v) = parse_var(&lookup, "PC_SEARCH_TIMEOUT_SECS")? {
            checker.search_timeout_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "PC_ONLINE_CONCURRENCY")? {
            checker.online_concurrency = v;
        }

        cfg.search.api_key = lookup("GOOGLE_API_KEY").filter(|v| !v.trim().is_empty());
        cfg.search.engine_id = lookup("GOOGLE_SEARCH_ENGINE_ID").filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = lookup("PC_SEARCH_ENDPOINT") {
            cfg.search.endpoint = endpoint;
        }

        if let Some(host) = lookup("PC_HOST") {
            cfg.server.host = host;
        }
        if let Some(v) = parse_var(&lookup, "PC_PORT")? {
            cfg.server.port = v;
        }
        if let Some(dir) = lookup("PC_UPLOAD_DIR") {
            cfg.server.upload_dir = PathBuf::from(dir);
        }

        cfg.checker.validate()?;
        debug!(
            upload_dir = %cfg.server.upload_dir.display(),
            search = cfg.search.is_configured(),
            "configuration loaded"
        );
        Ok(cfg)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| PcError::Config(format!("{key} has an invalid value: {raw:?}"))),
    }
}
