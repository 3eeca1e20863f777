//! Shared types, configuration and errors for the plagiarism checker.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CheckerConfig, SearchConfig, ServerConfig};
pub use error::{PcError, Result};
pub use types::{
    ComparisonReport, CorpusMatch, Document, DocumentId, FileFormat, InternalMatch,
    OnlineMatch, PlagiarismReport, ReportIssue, SourceMatch,
};
