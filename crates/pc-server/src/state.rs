//! Application state shared across all handlers.

use chrono::{DateTime, Utc};
use pc_core::config::AppConfig;
use pc_core::error::Result;
use pc_core::types::{CorpusMatch, InternalMatch, OnlineMatch};
use pc_corpus::DirectoryCorpus;
use pc_engine::PlagiarismChecker;
use pc_search::{GoogleSearch, NullSearch, WebSearch};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;
use tracing::{info, warn};

/// One checked upload and its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub original_filename: String,
    /// Name of the file inside the upload directory.
    pub stored_filename: String,
    /// Extension without the dot (`txt`, `docx`, `pdf`).
    pub file_type: String,
    pub upload_date: DateTime<Utc>,
    pub internal_plagiarism: Vec<InternalMatch>,
    pub online_plagiarism: Vec<OnlineMatch>,
    pub against_results: Vec<CorpusMatch>,
}

/// In-memory record store keyed by file id.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    inner: Arc<RwLock<HashMap<String, FileRecord>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: FileRecord) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<FileRecord> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).get(id).cloned()
    }

    /// All records, most recent upload first.
    pub fn list(&self) -> Vec<FileRecord> {
        let mut records: Vec<FileRecord> =
            self.inner.read().unwrap_or_else(PoisonError::into_inner).values().cloned().collect();
        records.sort_by(|a, b| b.upload_date.cmp(&a.upload_date).then_with(|| a.id.cmp(&b.id)));
        records
    }

    pub fn count(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<PlagiarismChecker>,
    /// Upload directory; every stored upload is part of the corpus.
    pub corpus: Arc<DirectoryCorpus>,
    pub search: Arc<dyn WebSearch>,
    pub records: RecordStore,
    pub max_upload_bytes: usize,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        checker: PlagiarismChecker,
        corpus: DirectoryCorpus,
        search: Arc<dyn WebSearch>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            checker: Arc::new(checker),
            corpus: Arc::new(corpus),
            search,
            records: RecordStore::new(),
            max_upload_bytes,
            start_time: Instant::now(),
        }
    }

    /// Build the state described by `config`, creating the upload directory.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let checker = PlagiarismChecker::new(config.checker.clone())?;
        let corpus = DirectoryCorpus::open(&config.server.upload_dir)?;
        Ok(Self::new(checker, corpus, search_backend(config), config.server.max_upload_bytes))
    }
}

/// Google Custom Search when credentials are present, otherwise a backend
/// that finds nothing.
pub fn search_backend(config: &AppConfig) -> Arc<dyn WebSearch> {
    if !config.search.is_configured() {
        info!("search credentials not set, online check disabled");
        return Arc::new(NullSearch);
    }
    match GoogleSearch::new(&config.search, config.checker.search_timeout()) {
        Ok(search) => Arc::new(search),
        Err(e) => {
            warn!(error = %e, "search backend unavailable, online check disabled");
            Arc::new(NullSearch)
        }
    }
}
