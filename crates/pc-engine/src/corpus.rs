//! Comparison against previously stored documents.

use pc_core::config::CheckerConfig;
use pc_core::types::{round2, ComparisonReport, CorpusMatch, Document, ReportIssue};
use pc_corpus::CorpusRepository;
use pc_parser::ParagraphSegmenter;
use tracing::{debug, warn};

use crate::normalize::normalize;
use crate::similarity::SimilarityScorer;

/// Per corpus document: the mean of all paragraph-pair scores above the
/// similarity threshold, as a percentage. Documents whose mean exceeds the
/// reporting threshold are reported, highest first; ties keep corpus order.
///
/// A corpus document that fails to load is skipped and recorded as an issue.
pub fn check_against_corpus(
    document: &Document,
    corpus: &dyn CorpusRepository,
    config: &CheckerConfig,
) -> ComparisonReport<CorpusMatch> {
    let segmenter = ParagraphSegmenter::new(config.max_paragraphs);
    let scorer = SimilarityScorer::from_config(config);
    let current: Vec<String> = segmenter
        .segment(&document.text)
        .into_iter()
        .map(normalize)
        .collect();

    let others = match corpus.list(Some(&document.id)) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(document = %document.id, error = %e, "cannot list corpus");
            return ComparisonReport::with_issues(Vec::new(), vec![ReportIssue::new("corpus", &e)]);
        }
    };

    let mut results = Vec::new();
    let mut issues = Vec::new();
    for id in others {
        if id == document.id {
            continue;
        }
        let text = match corpus.load(&id) {
            Ok(text) => text,
            Err(e) => {
                warn!(document = %id, error = %e, "corpus document skipped");
                issues.push(ReportIssue::new(id.as_str(), &e));
                continue;
            }
        };
        let other: Vec<String> = segmenter.segment(&text).into_iter().map(normalize).collect();

        let mut total_similarity = 0.0;
        let mut matched_paragraphs = 0usize;
        for cur in &current {
            for oth in &other {
                let score = scorer.normalized_similarity(cur, oth);
                if score > config.similarity_threshold {
                    total_similarity += score;
                    matched_paragraphs += 1;
                }
            }
        }
        if matched_paragraphs == 0 {
            continue;
        }

        let average = total_similarity / matched_paragraphs as f64 * 100.0;
        if average > config.reporting_threshold {
            results.push(CorpusMatch {
                document_id: id,
                plagiarism_percentage: round2(average),
                matched_paragraphs,
            });
        }
    }

    results.sort_by(|a, b| b.plagiarism_percentage.total_cmp(&a.plagiarism_percentage));
    debug!(document = %document.id, reported = results.len(), skipped = issues.len(), "corpus check done");
    ComparisonReport::with_issues(results, issues)
}
