//! Comparison against web content located through a search collaborator.

use pc_core::config::CheckerConfig;
use pc_core::types::{to_percentage, ComparisonReport, Document, OnlineMatch, ReportIssue, SourceMatch};
use pc_parser::ParagraphSegmenter;
use pc_search::{SearchError, WebSearch};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::normalize::normalize;
use crate::similarity::SimilarityScorer;

struct Lookup {
    sources: Vec<SourceMatch>,
    issues: Vec<ReportIssue>,
}

/// Search the web for every paragraph of at least
/// `min_online_paragraph_chars` characters and keep the results whose page (or
/// snippet, when the page is unavailable) scores above the similarity
/// threshold.
///
/// Up to `online_concurrency` paragraphs are looked up at once; entries come
/// back in paragraph order. A failed lookup only costs its own paragraph.
pub async fn check_online(
    document: &Document,
    search: Arc<dyn WebSearch>,
    config: &CheckerConfig,
) -> ComparisonReport<OnlineMatch> {
    let candidates: Vec<(usize, String)> = ParagraphSegmenter::new(config.max_paragraphs)
        .segment(&document.text)
        .into_iter()
        .enumerate()
        .filter(|(_, p)| p.chars().count() >= config.min_online_paragraph_chars)
        .map(|(i, p)| (i, p.to_string()))
        .collect();

    let semaphore = Arc::new(Semaphore::new(config.online_concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for (index, paragraph) in candidates {
        let search = Arc::clone(&search);
        let semaphore = Arc::clone(&semaphore);
        let config = config.clone();
        tasks.spawn(async move {
            let outcome = match semaphore.acquire_owned().await {
                Ok(_permit) => lookup_paragraph(&paragraph, search.as_ref(), &config).await,
                Err(_) => Err(SearchError::Transport("lookup cancelled".into())),
            };
            (index, paragraph, outcome)
        });
    }

    let mut outcomes = Vec::new();
    let mut issues = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                warn!(error = %e, "online lookup task aborted");
                issues.push(ReportIssue::new("online", &e));
            }
        }
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut entries = Vec::new();
    for (index, paragraph, outcome) in outcomes {
        match outcome {
            Ok(lookup) => {
                issues.extend(lookup.issues);
                if lookup.sources.is_empty() {
                    continue;
                }
                let max_similarity = lookup
                    .sources
                    .iter()
                    .map(|s| s.similarity)
                    .fold(f64::NEG_INFINITY, f64::max);
                entries.push(OnlineMatch { paragraph, sources: lookup.sources, max_similarity });
            }
            Err(e) => {
                warn!(document = %document.id, paragraph = index, error = %e, "online lookup failed");
                issues.push(ReportIssue::new(format!("paragraph {index}"), &e));
            }
        }
    }

    debug!(document = %document.id, matches = entries.len(), issues = issues.len(), "online check done");
    ComparisonReport::with_issues(entries, issues)
}

async fn lookup_paragraph(
    paragraph: &str,
    search: &dyn WebSearch,
    config: &CheckerConfig,
) -> Result<Lookup, SearchError> {
    let limit = config.search_timeout();
    let query = truncate_chars(paragraph, config.max_query_chars);
    let hits = timeout(limit, search.search(query, config.max_search_results))
        .await
        .map_err(|_| SearchError::Timeout)??;

    let scorer = SimilarityScorer::from_config(config);
    let normalized = normalize(paragraph);
    let mut sources = Vec::new();
    let mut issues = Vec::new();

    for hit in hits.into_iter().take(config.max_search_results) {
        let page = match timeout(limit, search.fetch(&hit.url)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(url = %hit.url, error = %e, "page fetch failed, using snippet");
                issues.push(ReportIssue::new(hit.url.as_str(), &e));
                String::new()
            }
            Err(_) => {
                warn!(url = %hit.url, "page fetch timed out, using snippet");
                issues.push(ReportIssue::new(hit.url.as_str(), SearchError::Timeout));
                String::new()
            }
        };
        let candidate = if page.trim().is_empty() { hit.snippet.as_str() } else { page.as_str() };
        if candidate.trim().is_empty() {
            continue;
        }

        let score = scorer.normalized_similarity(&normalized, &normalize(candidate));
        if score > config.similarity_threshold {
            sources.push(SourceMatch {
                url: hit.url,
                title: hit.title,
                snippet: hit.snippet,
                similarity: to_percentage(score),
            });
        }
    }

    Ok(Lookup { sources, issues })
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
