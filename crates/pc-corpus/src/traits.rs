use pc_core::error::Result;
use pc_core::types::DocumentId;

/// Lists stored documents and loads their text.
pub trait CorpusRepository: Send + Sync {
    /// Ids of all stored documents except `exclude`, in a stable order.
    fn list(&self, exclude: Option<&DocumentId>) -> Result<Vec<DocumentId>>;

    /// Extracted text of one stored document.
    fn load(&self, id: &DocumentId) -> Result<String>;
}
