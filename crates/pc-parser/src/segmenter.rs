//! Paragraph segmentation on blank-line boundaries.

use regex::Regex;
use std::sync::LazyLock;

static RE_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Splits text into at most `max_paragraphs` trimmed, non-empty paragraphs.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSegmenter {
    pub max_paragraphs: usize,
}

impl ParagraphSegmenter {
    pub fn new(max_paragraphs: usize) -> Self {
        Self { max_paragraphs }
    }

    /// Paragraphs in original order, truncated to `max_paragraphs`.
    /// No reordering, no deduplication.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        paragraphs(text).take(self.max_paragraphs).collect()
    }

    /// Number of non-empty paragraphs, ignoring the cap.
    pub fn count(&self, text: &str) -> usize {
        paragraphs(text).count()
    }
}

impl Default for ParagraphSegmenter {
    fn default() -> Self {
        Self::new(20)
    }
}

fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    RE_BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}
