//! Document comparison engine.
//!
//! Stages:
//! 1. Normalize: lower-case, collapse whitespace, drop punctuation
//! 2. Match: greedy longest-matching-block alignment of two char sequences
//! 3. Score: `2 * M / T` similarity ratio over normalized text
//! 4. Compare: internal (paragraph pairs of one document), corpus (against
//!    stored documents) and online (against web search results)

pub mod checker;
pub mod corpus;
pub mod internal;
pub mod matcher;
pub mod normalize;
pub mod online;
pub mod similarity;

pub use checker::PlagiarismChecker;
pub use corpus::check_against_corpus;
pub use internal::check_internal;
pub use normalize::normalize;
pub use online::check_online;
pub use similarity::{similarity, SimilarityScorer};
