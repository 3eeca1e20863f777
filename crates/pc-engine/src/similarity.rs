//! Character-level similarity ratio between two texts.

use pc_core::config::CheckerConfig;

use crate::matcher::SequenceMatcher;
use crate::normalize::normalize;

/// Scores text pairs in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    pub autojunk: bool,
}

impl SimilarityScorer {
    pub fn new(autojunk: bool) -> Self {
        Self { autojunk }
    }

    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(config.autojunk)
    }

    /// Normalize both texts, then score them.
    pub fn similarity(&self, text1: &str, text2: &str) -> f64 {
        self.normalized_similarity(&normalize(text1), &normalize(text2))
    }

    /// Score two already-normalized texts. 0.0 if either is empty, 1.0 only
    /// for identical inputs.
    pub fn normalized_similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }
        // The greedy alignment depends on argument order; a fixed order keeps
        // the score symmetric.
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let first: Vec<char> = first.chars().collect();
        let second: Vec<char> = second.chars().collect();
        SequenceMatcher::new(&first, &second, self.autojunk).ratio()
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// [`SimilarityScorer::similarity`] with default settings.
pub fn similarity(text1: &str, text2: &str) -> f64 {
    SimilarityScorer::default().similarity(text1, text2)
}
