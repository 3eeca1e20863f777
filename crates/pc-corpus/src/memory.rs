//! In-memory corpus, mostly for tests and embedding.

use pc_core::error::{PcError, Result};
use pc_core::types::DocumentId;

use crate::traits::CorpusRepository;

#[derive(Debug, Clone)]
enum Entry {
    Text(String),
    Broken(String),
}

/// Corpus held in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    entries: Vec<(DocumentId, Entry)>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, id: impl Into<DocumentId>, text: impl Into<String>) -> Self {
        self.insert(id, text);
        self
    }

    /// A document whose load always fails with an extraction error.
    pub fn with_broken_document(mut self, id: impl Into<DocumentId>, reason: impl Into<String>) -> Self {
        self.entries.push((id.into(), Entry::Broken(reason.into())));
        self
    }

    pub fn insert(&mut self, id: impl Into<DocumentId>, text: impl Into<String>) {
        let id = id.into();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.push((id, Entry::Text(text.into())));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CorpusRepository for MemoryCorpus {
    fn list(&self, exclude: Option<&DocumentId>) -> Result<Vec<DocumentId>> {
        Ok(self
            .entries
            .iter()
            .map(|(id, _)| id)
            .filter(|id| Some(*id) != exclude)
            .cloned()
            .collect())
    }

    fn load(&self, id: &DocumentId) -> Result<String> {
        match self.entries.iter().find(|(existing, _)| existing == id) {
            Some((_, Entry::Text(text))) => Ok(text.clone()),
            Some((_, Entry::Broken(reason))) => Err(PcError::extraction(id.as_str(), reason)),
            None => Err(PcError::extraction(id.as_str(), "no such document")),
        }
    }
}
