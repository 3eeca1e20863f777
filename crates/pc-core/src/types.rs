use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{PcError, Result};

/// Opaque handle of a document (a stored path, an upload id, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Path> for DocumentId {
    fn from(p: &Path) -> Self {
        Self(p.display().to_string())
    }
}

/// A document's identifier together with its extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into() }
    }
}

/// File formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Text,
    Docx,
    Pdf,
}

impl FileFormat {
    pub const ALL: [FileFormat; 3] = [FileFormat::Text, FileFormat::Docx, FileFormat::Pdf];

    /// Resolve a declared extension, with or without the leading dot, case-insensitively.
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "txt" => Ok(Self::Text),
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(PcError::unsupported(format!(".{normalized}"))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Docx => "docx",
            Self::Pdf => "pdf",
        }
    }
}

/// Two paragraphs of the same document that look alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalMatch {
    pub paragraph1: String,
    pub paragraph2: String,
    /// Percentage, two decimals.
    pub similarity: f64,
}

/// Aggregate overlap between the checked document and one corpus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMatch {
    pub document_id: DocumentId,
    pub plagiarism_percentage: f64,
    pub matched_paragraphs: usize,
}

/// A web page that overlaps a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMatch {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineMatch {
    pub paragraph: String,
    pub sources: Vec<SourceMatch>,
    pub max_similarity: f64,
}

/// A recovered, non-fatal failure observed while building a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportIssue {
    /// What failed: a corpus document id, a paragraph index, a url.
    pub subject: String,
    pub message: String,
}

impl ReportIssue {
    pub fn new(subject: impl Into<String>, message: impl fmt::Display) -> Self {
        Self { subject: subject.into(), message: message.to_string() }
    }
}

/// Output of one comparator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport<T> {
    pub entries: Vec<T>,
    #[serde(default)]
    pub issues: Vec<ReportIssue>,
}

impl<T> ComparisonReport<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries, issues: Vec::new() }
    }

    pub fn with_issues(entries: Vec<T>, issues: Vec<ReportIssue>) -> Self {
        Self { entries, issues }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }
}

impl<T> Default for ComparisonReport<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// All three reports for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismReport {
    pub filename: String,
    pub document_id: DocumentId,
    pub internal_plagiarism: Vec<InternalMatch>,
    pub online_plagiarism: Vec<OnlineMatch>,
    pub against_results: Vec<CorpusMatch>,
    pub total_paragraphs: usize,
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A [0, 1] score as a percentage with two decimals.
pub fn to_percentage(score: f64) -> f64 {
    round2(score * 100.0)
}
