//! Checker facade: one configuration shared by every comparison.

use pc_core::config::CheckerConfig;
use pc_core::error::Result;
use pc_core::types::{
    ComparisonReport, CorpusMatch, Document, InternalMatch, OnlineMatch, PlagiarismReport,
    ReportIssue,
};
use pc_corpus::CorpusRepository;
use pc_parser::ParagraphSegmenter;
use pc_search::WebSearch;
use std::sync::Arc;
use tracing::{error, info};

use crate::{corpus, internal, online};
use crate::similarity::SimilarityScorer;

/// Plagiarism checker bound to an immutable configuration.
#[derive(Debug, Clone)]
pub struct PlagiarismChecker {
    config: CheckerConfig,
}

impl PlagiarismChecker {
    pub fn new(config: CheckerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn segmenter(&self) -> ParagraphSegmenter {
        ParagraphSegmenter::new(self.config.max_paragraphs)
    }

    /// Similarity of two raw texts in [0, 1].
    pub fn similarity(&self, text1: &str, text2: &str) -> f64 {
        SimilarityScorer::from_config(&self.config).similarity(text1, text2)
    }

    pub fn check_internal(&self, document: &Document) -> ComparisonReport<InternalMatch> {
        internal::check_internal(document, &self.config)
    }

    pub fn check_against_corpus(
        &self,
        document: &Document,
        corpus: &dyn CorpusRepository,
    ) -> ComparisonReport<CorpusMatch> {
        corpus::check_against_corpus(document, corpus, &self.config)
    }

    pub async fn check_online(
        &self,
        document: &Document,
        search: Arc<dyn WebSearch>,
    ) -> ComparisonReport<OnlineMatch> {
        online::check_online(document, search, &self.config).await
    }

    /// Run every comparison for `document` and bundle the results.
    ///
    /// The internal and corpus checks read files and burn CPU, so they run on
    /// the blocking pool while the online lookups proceed.
    pub async fn generate_report(
        &self,
        filename: &str,
        document: &Document,
        corpus: Arc<dyn CorpusRepository>,
        search: Arc<dyn WebSearch>,
    ) -> PlagiarismReport {
        let checker = self.clone();
        let owned = document.clone();
        let local = tokio::task::spawn_blocking(move || {
            let internal = checker.check_internal(&owned);
            let against = checker.check_against_corpus(&owned, corpus.as_ref());
            (internal, against)
        });
        let (local, online) = tokio::join!(local, self.check_online(document, search));
        let (internal, against) = local.unwrap_or_else(|e| {
            error!(document = %document.id, error = %e, "local checks aborted");
            let issue = ReportIssue::new(document.id.as_str(), &e);
            (
                ComparisonReport::with_issues(Vec::new(), vec![issue.clone()]),
                ComparisonReport::with_issues(Vec::new(), vec![issue]),
            )
        });
        let total_paragraphs = self.segmenter().count(&document.text);

        info!(
            document = %document.id,
            internal = internal.len(),
            corpus = against.len(),
            online = online.len(),
            issues = against.issues.len() + online.issues.len(),
            "report generated"
        );

        PlagiarismReport {
            filename: filename.to_string(),
            document_id: document.id.clone(),
            internal_plagiarism: internal.into_entries(),
            online_plagiarism: online.into_entries(),
            against_results: against.into_entries(),
            total_paragraphs,
        }
    }
}

impl Default for PlagiarismChecker {
    fn default() -> Self {
        Self { config: CheckerConfig::default() }
    }
}
