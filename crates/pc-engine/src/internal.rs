//! Paragraph self-similarity within one document.

use pc_core::config::CheckerConfig;
use pc_core::types::{to_percentage, ComparisonReport, Document, InternalMatch};
use pc_parser::ParagraphSegmenter;
use tracing::debug;

use crate::normalize::normalize;
use crate::similarity::SimilarityScorer;

/// Every unordered paragraph pair `(i, j)`, `i < j`, scoring strictly above the
/// similarity threshold, in discovery order.
pub fn check_internal(document: &Document, config: &CheckerConfig) -> ComparisonReport<InternalMatch> {
    let paragraphs = ParagraphSegmenter::new(config.max_paragraphs).segment(&document.text);
    let normalized: Vec<String> = paragraphs.iter().map(|p| normalize(p)).collect();
    let scorer = SimilarityScorer::from_config(config);

    let mut matches = Vec::new();
    for i in 0..paragraphs.len() {
        for j in (i + 1)..paragraphs.len() {
            let score = scorer.normalized_similarity(&normalized[i], &normalized[j]);
            if score > config.similarity_threshold {
                matches.push(InternalMatch {
                    paragraph1: paragraphs[i].to_string(),
                    paragraph2: paragraphs[j].to_string(),
                    similarity: to_percentage(score),
                });
            }
        }
    }

    debug!(document = %document.id, paragraphs = paragraphs.len(), matches = matches.len(), "internal check done");
    ComparisonReport::new(matches)
}
