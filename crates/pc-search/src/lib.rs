//! Web search collaborator used by the online check.
//!
//! The checker only sees the [`WebSearch`] trait; [`GoogleSearch`] talks to the
//! Custom Search JSON API and [`NullSearch`] is used when no credentials exist.

pub mod error;
pub mod google;
pub mod html;
pub mod null;
pub mod traits;

pub use error::SearchError;
pub use google::GoogleSearch;
pub use null::NullSearch;
pub use traits::{SearchHit, WebSearch};

#[cfg(test)]
mod tests;
